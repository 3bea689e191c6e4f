//! Graceful shutdown trigger for the HTTP server.

use std::future::Future;

use tracing::{info, warn};

/// Resolves once `signal` fires. If the signal listener itself fails the
/// future never resolves, so the server keeps running instead of shutting
/// down right after startup.
pub async fn shutdown_on<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "Failed to listen for shutdown signal, graceful shutdown disabled");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn resolves_when_signal_fires() {
        let result =
            tokio::time::timeout(Duration::from_secs(1), shutdown_on(async { Ok(()) })).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn listener_failure_does_not_shut_down() {
        let failing = async { Err(std::io::Error::other("no signal handler")) };
        let result = tokio::time::timeout(Duration::from_millis(100), shutdown_on(failing)).await;
        assert!(result.is_err(), "shutdown must not trigger on listener failure");
    }
}
