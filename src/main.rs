//! respkv server entry point.
//!
//! Parses the command line, sets up logging, binds the listener and runs the
//! accept loop until Ctrl+C.

use anyhow::Context;
use clap::Parser;
use respkv::{serve, Config, ConnectionStats, Store};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("invalid log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    info!("respkv v{}", respkv::VERSION);

    // Shared across all connections
    let store = Arc::new(Store::new());
    let stats = Arc::new(ConnectionStats::new());

    let listener = TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_address()))?;
    info!("Listening on {}", config.bind_address());

    let shutdown = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received, stopping server..."),
            Err(e) => error!(error = %e, "Failed to listen for Ctrl+C"),
        }
    };

    tokio::select! {
        _ = serve(listener, Arc::clone(&store), Arc::clone(&stats)) => {}
        _ = shutdown => {}
    }

    let store_stats = store.stats();
    info!(
        keys = store_stats.keys,
        gets = store_stats.get_ops,
        sets = store_stats.set_ops,
        connections = stats.connections_accepted.load(Ordering::Relaxed),
        commands = stats.commands_processed.load(Ordering::Relaxed),
        "Server shutdown complete"
    );
    Ok(())
}
