//! Contact Book - Main entry point
//!
//! Loads configuration, opens the configured store and serves the HTTP API.

use anyhow::Result;
use contact_book::repositories::build_repository;
use contact_book::Config;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first so LOG_LEVEL can seed the filter
    let config = Config::from_env();

    let fallback = config
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        backend = ?config.store_backend,
        locale = %config.phone_locale,
        unique_names = config.enforce_unique_names,
        "Starting contact book"
    );

    let repo = build_repository(&config.store_backend, config.enforce_unique_names);
    if let Err(e) = repo.init().await {
        error!("Failed to open contact store: {}", e);
        return Err(e.into());
    }

    contact_book::server::run_server(&config, repo).await?;

    info!("Contact book shutdown complete");
    Ok(())
}
