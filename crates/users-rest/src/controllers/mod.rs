//! HTTP controllers.

pub mod health_controller;
pub mod metrics_controller;
