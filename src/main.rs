//! cors-relay binary.
//!
//! Boot sequence: parse CLI, load config, initialize tracing, bind the
//! listener, run the server until shutdown.

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cors_relay::config::loader::load_config;
use cors_relay::{HttpServer, ProxyConfig};

#[derive(Parser)]
#[command(name = "cors-relay")]
#[command(about = "Single-hop CORS forwarding proxy", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };

    // Initialize tracing subscriber; RUST_LOG overrides the configured level.
    let default_filter = format!(
        "cors_relay={},tower_http=debug",
        config.observability.log_level
    );
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("cors-relay v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        blocklist_keywords = config.blocklist.keywords.len(),
        max_body_bytes = config.limits.max_body_bytes,
        telemetry_enabled = config.telemetry.enabled,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    let server = HttpServer::new(config);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
