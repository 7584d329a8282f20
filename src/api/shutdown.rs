//! Graceful shutdown trigger for the HTTP server.

use std::fmt::Display;
use std::future::Future;

use tracing::{error, info};

/// Resolves when ctrl-c is received.
///
/// If the ctrl-c handler cannot be installed the failure is logged and the
/// future never resolves, so the server keeps serving until it is killed.
pub async fn shutdown_signal() {
    wait_for_signal(tokio::signal::ctrl_c()).await
}

/// Resolves once `signal` completes successfully. A signal that fails is
/// logged and then waits forever.
pub async fn wait_for_signal<F, E>(signal: F)
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    match signal.await {
        Ok(()) => info!("Shutdown signal received"),
        Err(error) => {
            error!(error = %error, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
