//! # Users Service
//!
//! Cache-aside read path for user records. Lookups try the cache first and
//! fall back to the store; saves write through and deletes invalidate.

pub mod cache;
pub mod lookup_metrics;
pub mod user_cache_service;
pub mod r#impl;

pub use cache::*;
pub use r#impl::{UserCacheServiceComponent, UserCacheServiceComponentParameters};
pub use user_cache_service::*;
