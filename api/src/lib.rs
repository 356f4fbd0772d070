//! Logscope API Server
//!
//! This crate provides the HTTP server for Logscope. It serves a read-only
//! view over the `*.log` files of one directory: filtered and paginated
//! listings, lookup by id, and aggregate statistics.
//!
//! # Architecture
//!
//! The API server is built on Axum and Tokio:
//! - One `DirectoryLogRepository` per process, shared through [`AppState`]
//! - Repository calls run on the blocking pool since they read files
//! - Filtering and statistics come from `shared::query`
//!
//! # Example
//!
//! ```no_run
//! use api::{run_server_with_config, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     run_server_with_config(Config::from_env()?).await
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod config;
mod routes;
mod state;

pub use config::{Config, LogFormat};
pub use state::AppState;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Runs the Logscope API server with the provided configuration.
///
/// Creates the log directory if it does not exist yet, then serves until
/// SIGTERM/SIGINT.
///
/// # Errors
///
/// Returns an error if:
/// - The log directory cannot be created
/// - The server fails to bind to the configured address
/// - A fatal error occurs during operation
pub async fn run_server_with_config(config: Config) -> Result<()> {
    let addr = config.socket_addr()?;

    std::fs::create_dir_all(&config.log_dir).with_context(|| {
        format!(
            "Failed to create log directory {}",
            config.log_dir.display()
        )
    })?;

    tracing::info!(
        host = %config.host,
        port = %config.port,
        log_dir = %config.log_dir.display(),
        "Logscope API server starting"
    );

    let app = create_router(AppState::with_log_dir(&config.log_dir));
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(%addr, "Listening for connections");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Creates the main application router with all routes and middleware.
///
/// This function is public to allow testing the router without starting a full server.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health_routes(state.clone()))
        .merge(routes::logs_routes(state))
        .layer(TraceLayer::new_for_http())
}

/// Waits for a shutdown signal (SIGTERM or SIGINT).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
