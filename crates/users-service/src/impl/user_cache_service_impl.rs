//! Cache-aside user service implementation.

use crate::cache::{cache_keys, CacheExt, CacheInterface};
use crate::lookup_metrics::LookupMetrics;
use crate::user_cache_service::{LookupResult, LookupSource, UserCacheService};
use async_trait::async_trait;
use shaku::Component;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use users_config::CacheConfig;
use users_core::{User, UsersError, UsersResult, ValidateExt};
use users_repository::UserRepository;
use users_resilience::{guarded, Dependency, TimeoutConfig};

/// Shaku-injectable cache-aside user service.
///
/// Reads go cache first, then store. A cache that fails or answers with an
/// undecodable value is treated as a miss; a store failure is always
/// returned to the caller.
#[derive(Component)]
#[shaku(interface = UserCacheService)]
pub struct UserCacheServiceComponent {
    #[shaku(inject)]
    user_repository: Arc<dyn UserRepository>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
    settings: CacheConfig,
}

impl UserCacheServiceComponent {
    /// Creates a service outside the DI container.
    #[must_use]
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        cache: Arc<dyn CacheInterface>,
        settings: CacheConfig,
    ) -> Self {
        Self {
            user_repository,
            cache,
            settings,
        }
    }

    fn key(&self, username: &str) -> String {
        cache_keys::user_key(&self.settings.key_prefix, username)
    }

    fn budget(&self, dependency: Dependency) -> Duration {
        TimeoutConfig {
            store_timeout: self.settings.store_timeout(),
            cache_timeout: self.settings.cache_timeout(),
        }
        .for_dependency(dependency)
    }

    async fn read_cache(&self, key: &str) -> Option<User> {
        let result = guarded(Dependency::Cache, "get", self.budget(Dependency::Cache), || {
            self.cache.get::<User>(key)
        })
        .await;

        match result {
            Ok(user) => user,
            Err(e) => {
                LookupMetrics::cache_error("get");
                warn!(key, error = %e, "Cache read failed, falling back to store");
                None
            }
        }
    }

    async fn write_cache(&self, key: &str, user: &User) -> UsersResult<()> {
        let ttl = self.settings.ttl();
        let result = guarded(Dependency::Cache, "set", self.budget(Dependency::Cache), || {
            self.cache.set(key, user, ttl)
        })
        .await;

        if result.is_err() {
            LookupMetrics::cache_error("set");
        }
        result
    }

    async fn evict(&self, key: &str) -> UsersResult<bool> {
        let result = guarded(Dependency::Cache, "delete", self.budget(Dependency::Cache), || {
            self.cache.delete(key)
        })
        .await;

        if result.is_err() {
            LookupMetrics::cache_error("delete");
        }
        result
    }

    fn store_failed(operation: &'static str, error: UsersError) -> UsersError {
        LookupMetrics::store_error(operation, &error);
        warn!(operation, error = %error, "Store call failed");
        error
    }

    fn finish(user: Option<User>, source: LookupSource, started: Instant) -> LookupResult {
        let elapsed = started.elapsed();
        let result = LookupResult {
            user,
            source,
            elapsed_millis: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        };

        LookupMetrics::lookup_completed(&result, elapsed);
        result
    }
}

#[async_trait]
impl UserCacheService for UserCacheServiceComponent {
    async fn get_user_by_username(&self, username: &str) -> UsersResult<LookupResult> {
        let started = Instant::now();
        let key = self.key(username);

        if let Some(user) = self.read_cache(&key).await {
            debug!("Cache hit for user: {}", username);
            return Ok(Self::finish(Some(user), LookupSource::Cache, started));
        }

        let user = guarded(
            Dependency::Store,
            "find_by_username",
            self.budget(Dependency::Store),
            || self.user_repository.find_by_username(username),
        )
        .await
        .map_err(|e| Self::store_failed("find_by_username", e))?;

        match &user {
            Some(found) => {
                if let Err(e) = self.write_cache(&key, found).await {
                    warn!(key = %key, error = %e, "Failed to populate cache after store hit");
                }
            }
            // Absent users are never cached
            None => debug!("User not found: {}", username),
        }

        Ok(Self::finish(user, LookupSource::Store, started))
    }

    async fn save_user(&self, user: User) -> UsersResult<User> {
        debug!("Saving user: {}", user.username);

        user.validate_request()?;

        let saved = guarded(Dependency::Store, "save", self.budget(Dependency::Store), || {
            self.user_repository.save(&user)
        })
        .await
        .map_err(|e| Self::store_failed("save", e))?;

        let key = self.key(&saved.username);
        if let Err(e) = self.write_cache(&key, &saved).await {
            warn!(key = %key, error = %e, "Cache write-through failed, evicting key");
            if let Err(e) = self.evict(&key).await {
                warn!(key = %key, error = %e, "Eviction failed, cached value may be stale");
            }
        }

        info!("User saved: {}", saved.username);
        Ok(saved)
    }

    async fn delete_user(&self, username: &str) -> UsersResult<()> {
        debug!("Deleting user: {}", username);

        let removed = guarded(
            Dependency::Store,
            "delete_by_username",
            self.budget(Dependency::Store),
            || self.user_repository.delete_by_username(username),
        )
        .await
        .map_err(|e| Self::store_failed("delete_by_username", e))?;

        if !removed {
            debug!("No stored user to delete: {}", username);
        }

        let key = self.key(username);
        self.evict(&key).await.map_err(|e| {
            warn!(key = %key, error = %e, "Cache invalidation failed after store delete");
            match e {
                UsersError::CacheUnavailable(_) => e,
                other => UsersError::CacheUnavailable(other.to_string()),
            }
        })?;

        info!("User deleted: {}", username);
        Ok(())
    }
}

impl std::fmt::Debug for UserCacheServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserCacheServiceComponent")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
