//! dApp client bootstrap.
//!
//! # Architecture Overview
//!
//! ```text
//!   config.toml ──▶ AppConfig ──▶ ContractRegistry
//!                       │
//!                       ▼
//!   ┌────────────────────────────────────────────────────────┐
//!   │ Bootstrap (spawned once)                               │
//!   │  provider → network → account → token → amm            │
//!   └──────────────────────────┬─────────────────────────────┘
//!                              │ set_* actions
//!                              ▼
//!                        SessionStore ◀── GET /session
//!
//!   GET / ──▶ static page (navigation, "Your ETH Balance: 0 ETH")
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use dapp_bootstrap::blockchain::{ContractRegistry, RpcWallet};
use dapp_bootstrap::config::{load_config, AppConfig};
use dapp_bootstrap::lifecycle::listen_for_signals;
use dapp_bootstrap::observability::{logging, metrics};
use dapp_bootstrap::{Bootstrap, HttpServer, SessionStore, Shutdown};

#[derive(Parser)]
#[command(name = "dapp-bootstrap")]
#[command(about = "Connects a wallet, loads network, account and contracts, and serves the page", long_about = None)]
struct Args {
    /// Path to the TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the page server bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.server.bind_address = bind;
    }

    logging::init_logging(&config.observability.log_level);

    tracing::info!("dapp-bootstrap v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        rpc_url = %config.wallet.rpc_url,
        networks = config.networks.len(),
        step_timeout_secs = config.bootstrap.step_timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let registry = ContractRegistry::from_config(&config.networks)?;
    let wallet = Arc::new(RpcWallet::from_config(&config.wallet)?);
    let bootstrap = Bootstrap::new(wallet, registry, config.bootstrap.clone());

    let store = SessionStore::new();
    let shutdown = Shutdown::new();
    tokio::spawn(listen_for_signals(shutdown.clone()));

    // Failures are logged by the bootstrap; the page keeps serving.
    let bootstrap_store = store.clone();
    let bootstrap_signal = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = bootstrap.run(&bootstrap_store, bootstrap_signal).await;
    });

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    let server = HttpServer::new(&config.server, store);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
