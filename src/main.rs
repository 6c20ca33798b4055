//! Detoxify API Server
//!
//! Serves `POST /analyze` for the browser extension.
//!
//! Usage:
//!   cargo run --bin detoxify_api
//!
//! Environment:
//!   GROQ_API_KEY  - Default Groq key (optional, heuristic-only without it)
//!   GROQ_MODEL    - Chat model (default: llama-3.3-70b-versatile)
//!   DETOX_PROVIDER_TIMEOUT_SECS - Provider call bound (default: 10)
//!   DETOX_HOST    - Server host (default: 127.0.0.1)
//!   PORT / DETOX_PORT - Server port (default: 5000)
//!   RUST_LOG      - Log level (default: info)

use detoxify_mediator::utils::constants::{APP_NAME, APP_VERSION};
use detoxify_mediator::{create_router, AppState, MediatorConfig};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = MediatorConfig::from_env();
    config.validate()?;

    info!("--- {} v{}: GROQ ENGINE ACTIVE ---", APP_NAME, APP_VERSION);
    info!(
        model = %config.provider.model,
        timeout_secs = config.provider.timeout.as_secs(),
        "Provider tier configured"
    );
    if !config.provider.has_default_key() {
        warn!("GROQ_API_KEY not set: only callers supplying their own key get model analysis");
    }

    let state = Arc::new(AppState::from_config(&config)?);
    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;

    info!("🚀 {} API listening on http://{}", APP_NAME, addr);
    info!("Endpoints:");
    info!("  POST /analyze - Toxicity analysis with rephrasings");
    info!("  GET  /health  - Health check");

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("👋 {} API shutdown complete", APP_NAME);

    Ok(())
}
