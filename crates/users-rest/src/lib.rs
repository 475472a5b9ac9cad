//! # Users REST
//!
//! HTTP surface for the Users API: the `/health` probe and, when enabled,
//! the Prometheus scrape endpoint. User operations are not routed over HTTP.

pub mod controllers;
pub mod middleware;
pub mod router;

pub use router::*;
