//! Repository trait definitions.

use async_trait::async_trait;
use users_core::{Interface, User, UsersResult};

/// Durable user store, keyed by username.
///
/// Absence is reported as `Ok(None)`. Implementations map connectivity
/// failures to `UsersError::StoreUnavailable`.
#[async_trait]
pub trait UserRepository: Interface + Send + Sync {
    /// Finds a user by username. Matching is exact and case-sensitive.
    async fn find_by_username(&self, username: &str) -> UsersResult<Option<User>>;

    /// Inserts the user or replaces the record with the same username,
    /// returning the record as stored.
    async fn save(&self, user: &User) -> UsersResult<User>;

    /// Deletes a user by username. Returns whether a record was removed.
    async fn delete_by_username(&self, username: &str) -> UsersResult<bool>;
}
