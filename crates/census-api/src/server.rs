//! Census API server lifecycle management.
//!
//! Provides [`start_server`] which binds to a TCP port and runs the
//! axum server until `Ctrl-C` is received, then returns so the caller
//! can close the connection pool.

use std::future::Future;
use std::net::SocketAddr;

use census_db::PostgresPool;
use tokio::net::TcpListener;
use tracing::info;

use crate::router::build_router;

/// Configuration for the census API server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The host address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// The TCP port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 4000,
        }
    }
}

/// Start the census API server.
///
/// Binds to the configured address, builds the router over the injected
/// pool, and serves requests until `Ctrl-C`. Returns `Ok(())` on clean
/// shutdown.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind or the server
/// encounters a fatal I/O error.
pub async fn start_server(config: &ServerConfig, pool: &PostgresPool) -> Result<(), ServerError> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| ServerError::Bind(format!("invalid address: {e}")))?;

    let router = build_router(pool);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind(format!("bind failed on {addr}: {e}")))?;

    info!(%addr, "Census API server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Serve(format!("serve error: {e}")))?;

    Ok(())
}

/// Resolve when the process receives `Ctrl-C`.
async fn shutdown_signal() {
    wait_for_shutdown(tokio::signal::ctrl_c()).await;
}

/// Resolve once `signal` yields `Ok`.
///
/// If the signal source fails to install, the future parks forever:
/// resolving here would read as an immediate shutdown request, and a
/// server without a `Ctrl-C` handler should keep serving rather than
/// exit on startup.
async fn wait_for_shutdown(signal: impl Future<Output = std::io::Result<()>>) {
    match signal.await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            tracing::error!(error = %e, "failed to install Ctrl-C handler; serving without one");
            std::future::pending::<()>().await;
        }
    }
}

/// Errors that can occur when starting or running the census API server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Failed to bind to the network address.
    #[error("bind error: {0}")]
    Bind(String),

    /// The server encountered a fatal error while serving.
    #[error("serve error: {0}")]
    Serve(String),
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn shutdown_waits_for_the_signal_to_fire() {
        let result = tokio::time::timeout(
            Duration::from_millis(50),
            wait_for_shutdown(async { Ok(()) }),
        )
        .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn failed_signal_install_keeps_the_server_running() {
        // A signal source that cannot be installed must not resolve,
        // otherwise graceful shutdown fires the moment the server starts.
        let result = tokio::time::timeout(
            Duration::from_millis(50),
            wait_for_shutdown(async { Err(std::io::Error::other("no handler")) }),
        )
        .await;
        assert!(result.is_err());
    }
}
