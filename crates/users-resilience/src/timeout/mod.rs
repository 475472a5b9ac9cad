//! Timeout wrapper for async operations.

use std::future::Future;
use std::time::Duration;
use tracing::warn;
use users_core::UsersError;

/// Wraps an async operation with a timeout.
pub async fn with_timeout<F, Fut, T>(duration: Duration, f: F) -> Result<T, UsersError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, UsersError>>,
{
    tokio::time::timeout(duration, f())
        .await
        .map_err(|_| UsersError::Timeout(format!("Operation timed out after {:?}", duration)))?
}

/// Collaborator a guarded call talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dependency {
    /// The durable user store.
    Store,
    /// The key-value cache.
    Cache,
}

impl Dependency {
    /// Returns the label used in logs and metrics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Store => "store",
            Self::Cache => "cache",
        }
    }

    fn unavailable(self, message: String) -> UsersError {
        match self {
            Self::Store => UsersError::StoreUnavailable(message),
            Self::Cache => UsersError::CacheUnavailable(message),
        }
    }
}

/// Runs a store or cache call under a deadline.
///
/// An elapsed deadline becomes the dependency's `*Unavailable` error, and
/// so does a generic `Timeout` reported by the call itself. Other errors
/// pass through untouched.
pub async fn guarded<F, Fut, T>(
    dependency: Dependency,
    operation: &'static str,
    duration: Duration,
    f: F,
) -> Result<T, UsersError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, UsersError>>,
{
    match with_timeout(duration, f).await {
        Err(UsersError::Timeout(message)) => {
            warn!(
                dependency = dependency.as_str(),
                operation,
                timeout_ms = budget_millis(duration),
                "Dependency call exceeded its deadline"
            );
            Err(dependency.unavailable(format!("{}: {}", operation, message)))
        }
        other => other,
    }
}

/// Whole milliseconds in a budget, saturating at `u64::MAX`.
#[must_use]
pub fn budget_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Timeout budgets for the two collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Budget for a single store call.
    pub store_timeout: Duration,
    /// Budget for a single cache call.
    pub cache_timeout: Duration,
}

impl TimeoutConfig {
    /// Returns the budget for the given dependency.
    #[must_use]
    pub const fn for_dependency(&self, dependency: Dependency) -> Duration {
        match dependency {
            Dependency::Store => self.store_timeout,
            Dependency::Cache => self.cache_timeout,
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            store_timeout: Duration::from_secs(5),
            cache_timeout: Duration::from_millis(500),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_millis_saturates() {
        assert_eq!(budget_millis(Duration::from_millis(500)), 500);
        assert_eq!(budget_millis(Duration::MAX), u64::MAX);
    }

    #[tokio::test]
    async fn test_timeout_success() {
        let result = with_timeout(Duration::from_secs(1), || async { Ok::<_, UsersError>(42) }).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_timeout_exceeded() {
        let result = with_timeout(Duration::from_millis(10), || async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Ok::<_, UsersError>(42)
        })
        .await;

        assert!(matches!(result, Err(UsersError::Timeout(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_guarded_store_timeout_is_store_unavailable() {
        let result = guarded(Dependency::Store, "find_by_username", Duration::from_millis(50), || async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok::<_, UsersError>(())
        })
        .await;

        match result {
            Err(UsersError::StoreUnavailable(msg)) => assert!(msg.starts_with("find_by_username")),
            other => panic!("Expected StoreUnavailable, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_guarded_cache_timeout_is_cache_unavailable() {
        let result = guarded(Dependency::Cache, "get", Duration::from_millis(50), || async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok::<_, UsersError>(())
        })
        .await;

        assert!(matches!(result, Err(UsersError::CacheUnavailable(_))));
    }

    #[tokio::test]
    async fn test_guarded_passes_other_errors_through() {
        let result: Result<(), _> = guarded(Dependency::Store, "save", Duration::from_secs(1), || async {
            Err(UsersError::conflict("duplicate username"))
        })
        .await;

        assert!(matches!(result, Err(UsersError::Conflict(_))));
    }

    #[test]
    fn test_budget_lookup() {
        let config = TimeoutConfig::default();
        assert_eq!(config.for_dependency(Dependency::Store), Duration::from_secs(5));
        assert_eq!(config.for_dependency(Dependency::Cache), Duration::from_millis(500));
    }
}
