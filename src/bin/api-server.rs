//! trendband API Server
//!
//! Serves chart payloads (price line, EMA, crossover markers) over HTTP,
//! plus health and Prometheus metrics endpoints.

use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};
use trendband::config::Config;
use trendband::core::http::start_server;
use trendband::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let config = Config::from_env();
    logging::init_logging(config.is_production());

    info!("Starting trendband API Server");
    info!(environment = %config.environment, "Environment");
    info!(
        period = config.analysis.ema_period,
        tolerance = config.analysis.tolerance,
        interval = %config.provider.interval,
        "Signal settings"
    );

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(config).await {
            error!(error = %e, "HTTP server error");
        }
    });

    info!("API server started, waiting for shutdown signal...");
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
