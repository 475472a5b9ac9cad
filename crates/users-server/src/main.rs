//! # Users API Server
//!
//! Loads configuration, installs tracing and metrics, wires the cache-aside
//! service and serves the health endpoint until shutdown.

use tracing::{error, info};
use users_config::ConfigLoader;
use users_core::telemetry::{init_telemetry, shutdown_telemetry};
use users_core::UsersResult;
use users_server::app::{install_metrics, telemetry_config, App};
use users_server::startup::print_banner;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Application error: {}", e);
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> UsersResult<()> {
    let config_loader = ConfigLoader::from_default_location()?;
    let config = config_loader.get().await;

    init_telemetry(&telemetry_config(&config))?;
    print_banner();

    info!("Starting Users API Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    let metrics = install_metrics(&config.observability)?;
    let app = App::build(config, metrics).await?;
    let result = app.serve().await;

    shutdown_telemetry();
    result
}
