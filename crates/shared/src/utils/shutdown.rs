use std::{fmt::Display, future::Future};
use tokio::signal;
use tracing::{error, info};

/// Resolves when `listener` reports a signal. A listener that could not be
/// installed never resolves, so it cannot trigger a shutdown by itself.
async fn wait_for<F, E>(name: &str, listener: F)
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    if let Err(e) = listener.await {
        error!("Failed to install {name} handler: {e}");
        std::future::pending::<()>().await;
    }
}

pub async fn shutdown_signal() {
    let ctrl_c = wait_for("Ctrl+C", signal::ctrl_c());

    #[cfg(unix)]
    let terminate = wait_for("SIGTERM", async {
        let mut sig = signal::unix::signal(signal::unix::SignalKind::terminate())?;
        sig.recv().await;
        Ok::<(), std::io::Error>(())
    });

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("🛑 Shutdown signal received (Ctrl+C)."),
        _ = terminate => info!("🛑 Shutdown signal received (SIGTERM)."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn failed_listener_never_resolves() {
        let broken = async { Err::<(), _>("not supported") };

        let result = timeout(Duration::from_millis(50), wait_for("Ctrl+C", broken)).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn delivered_signal_resolves() {
        let delivered = async { Ok::<(), &str>(()) };

        let result = timeout(Duration::from_millis(50), wait_for("Ctrl+C", delivered)).await;

        assert!(result.is_ok());
    }
}
