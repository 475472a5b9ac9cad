//! User cache service implementation.
//!
//! The trait definition lives in the parent module (`user_cache_service.rs`).

pub mod user_cache_service_impl;

pub use user_cache_service_impl::{UserCacheServiceComponent, UserCacheServiceComponentParameters};
