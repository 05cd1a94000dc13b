//! Signal-driven cancellation of the whole process.

use std::io;

use tokio::signal;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Resolves with the signal name on Ctrl+C or SIGTERM, whichever comes first.
///
/// # Errors
/// Returns an error if a signal handler cannot be installed.
pub async fn signal_received() -> io::Result<&'static str> {
    tokio::select! {
        r = signal::ctrl_c() => r.map(|()| "SIGINT"),
        r = terminate() => r.map(|()| "SIGTERM"),
    }
}

#[cfg(unix)]
async fn terminate() -> io::Result<()> {
    signal::unix::signal(signal::unix::SignalKind::terminate())?
        .recv()
        .await;
    Ok(())
}

#[cfg(not(unix))]
async fn terminate() -> io::Result<()> {
    std::future::pending().await
}

/// Cancels `token` on the first termination signal.
///
/// The task ends early if `token` is cancelled by someone else. If handlers
/// cannot be installed the token is left alone.
#[must_use = "dropping the handle detaches the signal task"]
pub fn cancel_on_signal(token: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            () = token.cancelled() => {}
            received = signal_received() => match received {
                Ok(name) => {
                    tracing::info!(signal = name, "Shutdown signal received, initiating graceful shutdown");
                    token.cancel();
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to install signal handlers, shutdown only via process kill");
                }
            }
        }
    })
}
