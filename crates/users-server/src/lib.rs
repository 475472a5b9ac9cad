//! # Users Server Library
//!
//! Dependency injection wiring and process lifecycle for the Users API.
//! Embedders can build an [`app::App`] and call the resolved
//! `UserCacheService` directly.

pub mod app;
pub mod di;
pub mod startup;
