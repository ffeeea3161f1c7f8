//! HexNet service.
//!
//! Serves the converter page and JSON API for DHCP classless static routes.
//!
//! # Architecture Overview
//!
//! ```text
//!     Browser / API client
//!            │
//!            ▼
//!     ┌─────────────┐    ┌──────────┐    ┌──────────────────────┐
//!     │ http server │───▶│ convert  │───▶│ codec                │
//!     │ (axum)      │    │ (lines)  │    │ encode/decode_stream │
//!     └─────────────┘    └──────────┘    └──────────────────────┘
//!            │
//!            ▼
//!     views (askama page) / JSON
//!
//!     Cross-cutting: config, observability, lifecycle
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use hexnet::config::resolve_config;
use hexnet::http::HttpServer;
use hexnet::lifecycle::{signals, Shutdown};
use hexnet::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "hexnet")]
#[command(about = "DHCP option 121/249 route converter service", long_about = None)]
struct Args {
    /// Path to a TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = resolve_config(args.config.as_deref(), args.bind)?;

    logging::init_logging(&config.observability)?;

    tracing::info!("hexnet v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config_file = ?args.config,
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        max_body_size = config.limits.max_body_size,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());

    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
