//! Coordinated shutdown for long-running servers.
//!
//! A [`ShutdownCoordinator`] waits for SIGINT or SIGTERM, flips a shared
//! flag, and fans the event out over a broadcast channel so the server
//! loop and cleanup tasks stop together.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::signal;
use tokio::sync::broadcast;
use tracing::info;

/// Fans a single shutdown event out to every interested task.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    notify: broadcast::Sender<()>,
    triggered: Arc<AtomicBool>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (notify, _) = broadcast::channel(1);
        Self {
            notify,
            triggered: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Receiver that gets a message once shutdown is triggered.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.notify.subscribe()
    }

    pub fn is_shutting_down(&self) -> bool {
        self.triggered.load(Ordering::Relaxed)
    }

    /// Trigger shutdown and notify subscribers. Only the first call has
    /// any effect.
    pub fn trigger(&self) {
        if self
            .triggered
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            info!("Initiating graceful shutdown");
            let _ = self.notify.send(());
        }
    }

    /// Block until SIGINT or SIGTERM arrives, then trigger shutdown.
    pub async fn wait_for_signal(&self) {
        let signal_name = os_shutdown_signal().await;
        info!("Received {signal_name}, initiating graceful shutdown");
        self.trigger();
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for SIGINT or SIGTERM without any cleanup coordination.
///
/// Suitable as a `with_graceful_shutdown` future when the server holds
/// no resources needing teardown.
pub async fn shutdown_signal() {
    let signal_name = os_shutdown_signal().await;
    info!("Received {signal_name}, shutting down");
}

/// Resolves when the process receives SIGINT or SIGTERM, returning the
/// signal name for logging.
async fn os_shutdown_signal() -> &'static str {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => "SIGINT",
        _ = terminate => "SIGTERM",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_trigger_notifies_subscribers() {
        let coordinator = ShutdownCoordinator::new();
        let mut rx = coordinator.subscribe();
        assert!(!coordinator.is_shutting_down());

        coordinator.trigger();
        assert!(coordinator.is_shutting_down());
        rx.recv().await.unwrap();
    }

    #[tokio::test]
    async fn test_trigger_fires_only_once() {
        let coordinator = ShutdownCoordinator::new();
        let mut rx = coordinator.subscribe();

        coordinator.trigger();
        coordinator.trigger();

        assert!(coordinator.is_shutting_down());
        rx.recv().await.unwrap();
        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }
}
