//! Triage HTTP server
//!
//! Run with: cargo run --bin triage-server
//!
//! Environment variables:
//! - TRIAGE_HOST: Bind address (default: 0.0.0.0)
//! - TRIAGE_PORT: Port number (default: 8080)
//! - RUST_LOG: Log level (default: info)

use triage::api::{run_server, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "triage=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let host = std::env::var("TRIAGE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("TRIAGE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let config = ServerConfig { host, port };

    tracing::info!("Triage configuration:");
    tracing::info!("  Host: {}:{}", config.host, config.port);

    run_server(config).await
}
