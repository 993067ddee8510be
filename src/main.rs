//! FlowClik tenancy resolution service.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────┐
//!                     │                TENANCY SERVICE                    │
//!   GET /resolve      │  ┌─────────┐   ┌────────────┐   ┌─────────────┐  │
//!   Host + path ──────┼─▶│  http   │──▶│  routing   │──▶│   tenant    │  │
//!                     │  │ server  │   │ classifier │   │  resolver   │  │
//!                     │  └─────────┘   │ route base │   │ theme store │  │
//!                     │                └────────────┘   └──────┬──────┘  │
//!                     │                                        ▼         │
//!   Resolution JSON   │                                 ┌─────────────┐  │
//!   ◀─────────────────┼─────────────────────────────────│    theme    │  │
//!                     │                                 │   applier   │  │
//!                     │                                 └─────────────┘  │
//!                     │  config (watch + reload) · observability ·       │
//!                     │  lifecycle (signals, shutdown)                   │
//!                     └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use flowclik_tenancy::config::watcher::ConfigWatcher;
use flowclik_tenancy::http::HttpServer;
use flowclik_tenancy::lifecycle::{signals, startup, Shutdown};
use flowclik_tenancy::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "flowclik-tenancy")]
#[command(about = "Tenant and theme resolution service for FlowClik", long_about = None)]
struct Args {
    /// Path to the TOML config file (falls back to $FLOWCLIK_TENANCY_CONFIG).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Do not watch the config file for changes.
    #[arg(long)]
    no_watch: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config_path = startup::config_path(args.config);
    let config = startup::load_startup_config(config_path.as_deref())?;

    logging::init(&config.observability);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "flowclik-tenancy starting");
    tracing::info!(
        config_path = ?config_path,
        bind_address = %config.listener.bind_address,
        main_domains = ?config.domains.main_domains,
        dev_prefix = %config.routing.dev_prefix,
        tenants = config.tenants.len(),
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

    // Keep the watcher alive for the lifetime of the server.
    let (config_updates, _watcher) = match (&config_path, args.no_watch) {
        (Some(path), false) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            (updates, Some(watcher.run()?))
        }
        _ => {
            let (_, updates) = mpsc::unbounded_channel();
            (updates, None)
        }
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());

    let server = HttpServer::new(config);
    server.run(listener, config_updates, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
