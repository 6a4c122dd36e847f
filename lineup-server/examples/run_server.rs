//! Example to run the lineup server standalone
//!
//! Run with: cargo run -p lineup-server --example run_server [bundle.json]

use lineup_server::{run_server, ServerConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig {
        bundle: std::env::args().nth(1).map(Into::into),
        ..ServerConfig::default()
    };

    println!("Starting lineup server on port {}", config.port);
    if let Some(bundle) = &config.bundle {
        println!("Preloading team from: {}", bundle.display());
    }
    println!("Try http://localhost:{}/api/status", config.port);

    run_server(config).await
}
