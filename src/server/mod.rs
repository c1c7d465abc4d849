//! HTTP server for the contact book.
//!
//! Wires the configured store, validator and service into an axum router
//! and serves it until Ctrl-C, then flushes the store.

pub mod handlers;

pub use handlers::{router, AppState};

use crate::config::Config;
use crate::metrics::Metrics;
use crate::repositories::ContactRepository;
use crate::services::ContactServiceImpl;
use crate::validation::ContactValidator;
use anyhow::Result;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Assemble application state around an initialized repository.
pub fn app_state(repo: Arc<dyn ContactRepository>, config: &Config) -> AppState {
    let metrics = Metrics::new();
    let validator = ContactValidator::new(config.phone_locale);
    let service = Arc::new(ContactServiceImpl::new(repo, validator, metrics.clone()));
    AppState::new(service, metrics)
}

/// Serve the contact book on `config.bind_addr` until Ctrl-C.
///
/// The repository must already be initialized; it is shut down after the
/// server stops accepting connections.
pub async fn run_server(config: &Config, repo: Arc<dyn ContactRepository>) -> Result<()> {
    let app = router(app_state(repo.clone(), config));

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "contact book listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped, flushing store");
    repo.shutdown().await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
