//! Delivery-zone service.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────┐
//!                     │                 DELIVERY ZONES                   │
//!                     │                                                  │
//!   POST /api/...     │  ┌─────────┐    ┌──────────┐    ┌────────────┐   │
//!   ──────────────────┼─▶│  http   │───▶│ delivery │───▶│   zones    │   │
//!                     │  │ server  │    │ handlers │    │  resolver  │   │
//!                     │  └─────────┘    └──────────┘    └─────┬──────┘   │
//!                     │                                       │          │
//!                     │                                       ▼          │
//!   JSON response     │                                 ┌────────────┐   │
//!   ◀─────────────────┼─────────────────────────────────│   charge   │   │
//!                     │                                 └────────────┘   │
//!                     │                                                  │
//!                     │  config file ──▶ watcher ──▶ LiveZoneStore swap  │
//!                     │  observability · admin · lifecycle               │
//!                     └──────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use delivery_zones::config::{
    load_config, report_dead_patterns, watcher::ConfigWatcher, ServiceConfig,
};
use delivery_zones::lifecycle::{signals::shutdown_on_signal, Shutdown};
use delivery_zones::observability::{logging, metrics};
use delivery_zones::HttpServer;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(name = "delivery-zones", version, about = "Delivery-zone resolution service")]
struct Args {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(short, long, env = "DELIVERY_ZONES_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load before logging so the configured level and format apply from the first event.
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };

    logging::init_logging(&config.observability)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "delivery-zones starting");

    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_connections = config.listener.max_connections,
        request_timeout_secs = config.timeouts.request_secs,
        zones = config.zones.len(),
        "Configuration loaded"
    );
    if config.zones.is_empty() {
        tracing::warn!(
            "No zones configured; every postal code will be reported as not serviceable"
        );
    }
    report_dead_patterns(&config);

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    // Keep the watcher alive for the lifetime of the server.
    let (_watcher, config_updates) = match &args.config {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            (Some(watcher.run()?), updates)
        }
        None => {
            let (_, updates) = mpsc::unbounded_channel();
            (None, updates)
        }
    };

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(shutdown_on_signal(shutdown));

    let server = HttpServer::new(config);
    server.run(listener, config_updates, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
