//! # Users Core
//!
//! Core types and error definitions for the Users API.
//! This crate provides the `User` entity and the unified error type shared
//! by the repository, service and transport layers.

pub mod domain;
pub mod error;
pub mod result;
pub mod telemetry;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use result::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
