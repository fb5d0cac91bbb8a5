//! # joinbridged — joinbridge daemon
//!
//! Composition root that wires the gateway, the device registry and the HTTP
//! adapter together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (env vars, config file)
//! - Install the `tracing` subscriber
//! - Construct the gateway and the device registry from `[[devices]]`
//! - Relay gateway pushes onto the invalidation bus
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no translation logic belongs here.

mod config;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use joinbridge_adapter_http_axum::state::AppState;
use joinbridge_adapter_virtual::InMemoryGateway;
use joinbridge_app::services::device_registry::DeviceRegistry;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    let bind_addr = config.bind_addr();

    // Gateway
    let gateway = Arc::new(InMemoryGateway::new(config.gateway.echo));

    // Registry
    let registry = Arc::new(
        DeviceRegistry::new(gateway, config.devices).context("building device registry")?,
    );
    registry.attach();
    tracing::info!(devices = registry.list().len(), "device registry ready");

    // HTTP
    let app = joinbridge_adapter_http_axum::router::build(AppState::from_arc(Arc::clone(
        &registry,
    )));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;
    tracing::info!(%bind_addr, "joinbridged listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    registry.detach();
    tracing::info!("joinbridged stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
