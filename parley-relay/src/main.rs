mod config;

use anyhow::{Context, Result};
use axum::http::Method;
use axum::{Router, routing::get};
use clap::Parser;
use parley_server::{Relay, RelayCommand, SignalingService, ws_handler};
use std::sync::Arc;
use tokio::sync::mpsc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.relay_config();
    info!(
        "Starting relay (grace {:?}, candidate ttl {:?})",
        config.disconnect_grace, config.candidate_ttl
    );

    // Sockets push commands here; the relay drains them one at a time.
    let (cmd_tx, cmd_rx) = mpsc::channel::<RelayCommand>(config.command_buffer);
    let signaling = SignalingService::new(cmd_tx);

    let relay = Relay::new(config, cmd_rx, Arc::new(signaling.clone()));
    tokio::spawn(relay.run());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST]);

    let app = Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/ws", get(ws_handler))
        .layer(cors)
        .with_state(signaling);

    let addr = cli.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Signaling relay listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Relay stopped");
    Ok(())
}

async fn root() -> &'static str {
    "Relay is working!"
}

async fn health_check() -> &'static str {
    "OK"
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown requested");
    }
}
