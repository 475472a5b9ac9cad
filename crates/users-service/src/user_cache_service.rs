//! User lookup service trait definition.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shaku::Interface;
use std::fmt;
use users_core::{User, UsersResult};

/// Where a lookup result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupSource {
    /// Served from the key-value cache.
    Cache,
    /// Served from the backing store, including "not found" answers.
    Store,
}

impl LookupSource {
    /// Returns the wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cache => "cache",
            Self::Store => "store",
        }
    }
}

impl fmt::Display for LookupSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResult {
    /// The user, or `None` when neither cache nor store knows the username.
    pub user: Option<User>,
    /// Which collaborator answered.
    pub source: LookupSource,
    /// Wall-clock time spent inside the lookup, in milliseconds.
    pub elapsed_millis: u64,
}

impl LookupResult {
    /// Returns true if a user was found.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        self.user.is_some()
    }
}

/// Cache-aside access to user records.
#[async_trait]
pub trait UserCacheService: Interface + Send + Sync {
    /// Looks up a user, trying the cache before the store.
    ///
    /// A missing user is a successful result with `user: None`.
    async fn get_user_by_username(&self, username: &str) -> UsersResult<LookupResult>;

    /// Persists a user and writes the stored value through to the cache.
    async fn save_user(&self, user: User) -> UsersResult<User>;

    /// Removes a user from the store, then from the cache.
    async fn delete_user(&self, username: &str) -> UsersResult<()>;
}
