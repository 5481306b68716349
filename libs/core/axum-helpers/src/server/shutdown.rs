use std::sync::Arc;
use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info};

/// Shared shutdown flag for the HTTP server and its cleanup task.
///
/// Clones observe the same state. The flag flips once, either from an OS
/// signal seen by [`wait_for_signal`](Self::wait_for_signal) or from an
/// explicit [`shutdown`](Self::shutdown).
#[derive(Clone)]
pub struct ShutdownCoordinator {
    state: Arc<watch::Sender<bool>>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (state, _) = watch::channel(false);
        Self {
            state: Arc::new(state),
        }
    }

    /// Receiver that observes `true` once shutdown starts
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.state.subscribe()
    }

    pub fn is_shutting_down(&self) -> bool {
        *self.state.borrow()
    }

    /// Flip the flag; later calls are no-ops.
    pub fn shutdown(&self) {
        let first = self.state.send_if_modified(|down| !std::mem::replace(down, true));
        if first {
            info!("Initiating graceful shutdown");
        }
    }

    /// Resolves once SIGINT/SIGTERM arrives or `shutdown()` is called elsewhere.
    pub async fn wait_for_signal(&self) {
        let mut rx = self.subscribe();
        let flagged = async move {
            let _ = rx.wait_for(|down| *down).await;
        };

        tokio::select! {
            _ = shutdown_signal() => self.shutdown(),
            _ = flagged => {},
        }
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves on Ctrl+C or SIGTERM.
///
/// A handler that fails to install is logged and never fires.
pub async fn shutdown_signal() {
    let interrupt = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received SIGINT"),
            Err(e) => {
                error!(error = %e, "Could not listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received SIGTERM");
            }
            Err(e) => {
                error!(error = %e, "Could not listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_shutdown_flips_flag_once() {
        let coordinator = ShutdownCoordinator::new();
        let mut rx = coordinator.subscribe();
        assert!(!coordinator.is_shutting_down());

        coordinator.shutdown();
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        coordinator.shutdown();
        assert!(coordinator.is_shutting_down());
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_wait_for_signal_returns_after_manual_shutdown() {
        let coordinator = ShutdownCoordinator::default();
        let waiter = coordinator.clone();
        let handle = tokio::spawn(async move { waiter.wait_for_signal().await });

        tokio::time::sleep(Duration::from_millis(10)).await;
        coordinator.shutdown();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("wait_for_signal should resolve")
            .unwrap();
    }

    #[tokio::test]
    async fn test_wait_for_signal_returns_immediately_when_already_shut_down() {
        let coordinator = ShutdownCoordinator::default();
        coordinator.shutdown();

        tokio::time::timeout(Duration::from_millis(100), coordinator.wait_for_signal())
            .await
            .expect("already shut down");
    }
}
