//! Listener setup and graceful shutdown.

use tokio::net::TcpListener;
use treeline_core::{Error, Result};

use crate::router::router;
use crate::state::ApiState;

/// Bind `host:port` and serve until Ctrl-C.
///
/// `host` may be a name; it is resolved before binding.
pub async fn serve(state: ApiState, host: &str, port: u16) -> Result<()> {
    let listener = TcpListener::bind((host, port))
        .await
        .map_err(|e| Error::config(format!("cannot bind {host}:{port}: {e}")))?;
    serve_on(listener, state, shutdown_signal()).await
}

/// Serve on an already-bound listener until `shutdown` resolves.
pub async fn serve_on<F>(listener: TcpListener, state: ApiState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let local = listener.local_addr()?;
    tracing::info!("Server is running on http://{local}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Resolves on Ctrl-C.
pub async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutdown signal received");
}
