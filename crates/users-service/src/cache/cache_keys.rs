//! Cache key generators for consistent key naming.

use users_config::DEFAULT_KEY_PREFIX;

/// Builds the cache key for a user under the given prefix.
///
/// The username is appended verbatim: no case folding, no trimming.
#[must_use]
pub fn user_key(prefix: &str, username: &str) -> String {
    let mut key = String::with_capacity(prefix.len() + username.len());
    key.push_str(prefix);
    key.push_str(username);
    key
}

/// Generate a cache key for a user by username under the default `user:` prefix.
#[must_use]
pub fn user_by_username(username: &str) -> String {
    user_key(DEFAULT_KEY_PREFIX, username)
}
