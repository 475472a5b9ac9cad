//! Application assembly and lifecycle.

use crate::di::{build_users_module, UsersModule, UsersResolver};
use crate::startup::{print_startup_info, shutdown_signal};
use axum::Router;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::sync::Arc;
use tracing::info;
use users_config::{AppConfig, ObservabilityConfig};
use users_core::telemetry::TelemetryConfig;
use users_core::{UsersError, UsersResult};
use users_rest::{create_router, MetricsEndpoint};
use users_service::{lookup_metrics, UserCacheService};

/// Derives the tracing setup from the observability section.
#[must_use]
pub fn telemetry_config(config: &AppConfig) -> TelemetryConfig {
    let observability = &config.observability;

    TelemetryConfig {
        enabled: observability.tracing_enabled,
        service_name: config.app.name.clone(),
        otlp_endpoint: observability.otlp_endpoint.clone(),
        sampling_ratio: observability.sampling_ratio,
        console_output: true,
        json_output: observability.is_json(),
        default_filter: observability.log_level.to_lowercase(),
    }
}

/// Installs the global Prometheus recorder when metrics are enabled.
pub fn install_metrics(config: &ObservabilityConfig) -> UsersResult<Option<MetricsEndpoint>> {
    if !config.metrics_enabled {
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| UsersError::Internal(format!("Failed to install metrics recorder: {}", e)))?;
    lookup_metrics::register_metrics();

    Ok(Some(MetricsEndpoint {
        handle,
        path: config.metrics_path.clone(),
    }))
}

/// A wired Users API instance.
pub struct App {
    config: AppConfig,
    module: Arc<UsersModule>,
    metrics: Option<MetricsEndpoint>,
}

impl App {
    /// Connects collaborators, checks the database and applies migrations.
    pub async fn build(config: AppConfig, metrics: Option<MetricsEndpoint>) -> UsersResult<Self> {
        let module = build_users_module(&config).await?;

        let db_pool = module.database_pool();
        db_pool.health_check().await?;
        if config.database.run_migrations {
            db_pool.run_migrations().await?;
        }

        Ok(Self {
            config,
            module,
            metrics,
        })
    }

    /// Returns the cache-aside user service.
    #[must_use]
    pub fn user_cache_service(&self) -> Arc<dyn UserCacheService> {
        self.module.user_cache_service()
    }

    /// Returns the HTTP router.
    #[must_use]
    pub fn router(&self) -> Router {
        create_router(&self.config.server, self.metrics.clone())
    }

    /// Serves HTTP until a shutdown signal arrives, then closes the pool.
    pub async fn serve(self) -> UsersResult<()> {
        let addr = self.config.server.addr();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| UsersError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

        print_startup_info(
            &addr,
            self.metrics.as_ref().map(|endpoint| endpoint.path.as_str()),
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| UsersError::Internal(format!("HTTP server error: {}", e)))?;

        self.module.database_pool().close().await;
        info!("Server shutdown complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_telemetry_config_follows_observability() {
        let mut config = AppConfig::default();
        config.observability.log_format = "json".to_string();
        config.observability.log_level = "WARN".to_string();
        config.observability.tracing_enabled = true;
        config.observability.otlp_endpoint = Some("http://collector:4317".to_string());
        config.observability.sampling_ratio = 0.25;

        let telemetry = telemetry_config(&config);

        assert!(telemetry.enabled);
        assert!(telemetry.json_output);
        assert_eq!(telemetry.service_name, "users-api");
        assert_eq!(telemetry.default_filter, "warn");
        assert_eq!(telemetry.sampling_ratio, 0.25);
        assert_eq!(telemetry.otlp_endpoint.as_deref(), Some("http://collector:4317"));
    }

    #[test]
    fn test_metrics_disabled_installs_nothing() {
        let config = ObservabilityConfig {
            metrics_enabled: false,
            ..ObservabilityConfig::default()
        };

        assert!(install_metrics(&config).unwrap().is_none());
    }
}
