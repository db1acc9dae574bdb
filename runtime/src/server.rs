//! HTTP entry point.
//!
//! One fallback route so every method and path reaches the dispatcher; the
//! platform addresses phases via the control-path header, never the URL.
//! Each connection is served on its own task by axum/hyper, which gives the
//! one-task-per-request scheduling model the phase handlers assume.

use crate::config::Config;
use crate::dispatch::dispatch;
use crate::state::AppState;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Build the shim router.
///
/// A single fallback handler is the whole routing table: dispatching on the
/// control-path header happens inside [`dispatch`].
pub fn build_router(state: AppState) -> Router {
    Router::new().fallback(dispatch).with_state(state)
}

/// Bind the listener and serve until a shutdown signal arrives.
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails while
/// accepting connections.
pub async fn serve(config: Arc<Config>, state: AppState) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(addr = %listener.local_addr()?, "Function runtime listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            tracing::warn!("Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => tracing::warn!(%error, "Failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
