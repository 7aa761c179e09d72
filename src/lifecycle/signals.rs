//! OS signal handling.
//!
//! # Responsibilities
//! - Register SIGINT/SIGTERM handlers
//! - Translate the first signal into the internal shutdown broadcast

use tokio::signal;

use super::shutdown::Shutdown;

/// Wait for an interrupt or terminate signal, then trigger shutdown.
///
/// Spawned once at startup; exits after the first signal.
pub async fn listen(shutdown: Shutdown) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    tracing::info!("Shutdown signal received");
    shutdown.trigger();
}
