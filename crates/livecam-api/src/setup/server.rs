//! Listener and shutdown handling for the clip redirect service.

use anyhow::{Context, Result};
use axum::Router;
use livecam_core::Config;
use std::net::{Ipv4Addr, SocketAddr};

/// Bind `0.0.0.0:{PORT}` and serve `app` until SIGINT or SIGTERM.
///
/// In-flight redirects are allowed to finish; each one is bounded by the store
/// timeout, so shutdown waits at most one listing plus one signing.
pub async fn start_server(config: &Config, app: Router) -> Result<()> {
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.server_port()));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(
        addr = %addr,
        timezone = %config.clips.timezone,
        lookback_secs = config.clips.lookback_secs,
        url_ttl_secs = config.clips.url_ttl_secs,
        "Serving live clips"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on the first of Ctrl+C or SIGTERM.
///
/// A handler that cannot be installed is logged and ignored, so the other
/// signal still stops the server.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
