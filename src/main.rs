//! HTTP Coach (v1)
//!
//! Audits a site's security response headers, asks an inference service for
//! remediation advice and keeps a per-client history of results.
//!
//! # Architecture Overview
//!
//! ```text
//!                          ┌──────────────────────────────────────────────────┐
//!                          │                    HTTP COACH                    │
//!                          │                                                  │
//!   GET /api/audit         │  ┌─────────┐    ┌──────────┐    ┌────────────┐   │
//!   ───────────────────────┼─▶│  http   │───▶│  audit   │───▶│  auditor   │───┼──▶ target site
//!                          │  │ server  │    │ service  │    └────────────┘   │
//!                          │  └─────────┘    │          │    ┌────────────┐   │
//!                          │       ▲         │          │───▶│  advisory  │───┼──▶ inference API
//!                          │       │         │          │    └────────────┘   │
//!   GET /api/history       │       │         │          │    ┌────────────┐   │
//!   ───────────────────────┼───────┘         │          │───▶│  history   │   │
//!                          │                 └──────────┘    │  ledger    │   │
//!                          │                                 └─────┬──────┘   │
//!                          │                                       ▼          │
//!                          │                                 ┌────────────┐   │
//!                          │                                 │  KvStore   │   │
//!                          │                                 └────────────┘   │
//!                          │  config · observability · lifecycle              │
//!                          └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use http_coach::config::loader::load_config;
use http_coach::config::CoachConfig;
use http_coach::lifecycle::{build_service, shutdown_signal};
use http_coach::observability::{logging, metrics};
use http_coach::HttpServer;

#[derive(Parser)]
#[command(name = "http-coach")]
#[command(about = "Security header audit service", long_about = None)]
struct Args {
    /// Path to a TOML configuration file (defaults apply when omitted).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => CoachConfig::default(),
    };

    logging::init_logging(&config.observability);

    tracing::info!("http-coach v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config_file = ?args.config,
        bind_address = %config.listener.bind_address,
        store = ?config.history.backend,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let service = build_service(&config).await?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    HttpServer::new(service)
        .run(listener, shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
