//! # Users Resilience
//!
//! Deadline guards for the user store and cache. A call that does not
//! answer within its budget is reported as its collaborator being
//! unavailable, so a hung dependency cannot stall a request.

pub mod timeout;

pub use timeout::*;
