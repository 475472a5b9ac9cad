//! Main application router.

use crate::{
    controllers::{health_controller, metrics_controller},
    middleware::logging_middleware,
};
use axum::{http::HeaderValue, middleware, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use users_config::ServerConfig;

/// Prometheus scrape endpoint to mount on the router.
#[derive(Clone)]
pub struct MetricsEndpoint {
    /// Handle to the installed recorder.
    pub handle: PrometheusHandle,
    /// Path to serve the snapshot at.
    pub path: String,
}

/// Creates the main application router.
pub fn create_router(server_config: &ServerConfig, metrics: Option<MetricsEndpoint>) -> Router {
    let mut router = Router::new().merge(health_controller::router());

    if let Some(endpoint) = metrics {
        info!("Serving Prometheus metrics at {}", endpoint.path);
        router = router.merge(metrics_controller::router(endpoint.handle, &endpoint.path));
    }

    router
        .layer(TimeoutLayer::new(server_config.request_timeout()))
        .layer(create_cors_layer(server_config))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware))
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if !server_config.cors_enabled {
        return CorsLayer::new();
    }

    if server_config.cors_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = server_config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
