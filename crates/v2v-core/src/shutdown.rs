//! Process-wide shutdown signal shared by the engines and the detection task.
//!
//! Every long-running loop in the workspace blocks on a transport or on the
//! detection rendezvous with no timeout, so a polled flag cannot stop it.
//! Instead each loop races its blocking await against
//! [`ShutdownListener::wait`] in a `tokio::select!`, and the binary triggers
//! the signal from its Ctrl-C handler.
//!
//! ```rust
//! # tokio_test::block_on(async {
//! use v2v_core::shutdown::Shutdown;
//!
//! let shutdown = Shutdown::new();
//! let mut listener = shutdown.listener();
//! shutdown.trigger();
//! listener.wait().await; // returns immediately once triggered
//! assert!(listener.is_triggered());
//! # });
//! ```

use std::future::Future;

use tokio::sync::watch;
use tracing::{error, info};

/// The sending side: owned by `main`, triggered once.
#[derive(Debug)]
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

/// A cloneable handle that resolves once shutdown has been triggered.
#[derive(Debug, Clone)]
pub struct ShutdownListener {
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    /// Creates an untriggered signal.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// Returns a new listener for this signal.
    pub fn listener(&self) -> ShutdownListener {
        ShutdownListener {
            rx: self.tx.subscribe(),
        }
    }

    /// Triggers shutdown; idempotent.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    /// Triggers shutdown once `signal` resolves, e.g. `tokio::signal::ctrl_c()`.
    ///
    /// If the signal cannot be installed the error is logged and this future
    /// never completes.  It keeps `self` alive so listeners do not read the
    /// dropped sender as a shutdown request.
    pub async fn trigger_on<F>(self, signal: F)
    where
        F: Future<Output = std::io::Result<()>>,
    {
        match signal.await {
            Ok(()) => {
                info!("shutdown signal received");
                self.trigger();
            }
            Err(e) => {
                error!("failed to listen for shutdown signal: {e}");
                std::future::pending::<()>().await;
            }
        }
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownListener {
    /// Resolves once shutdown has been triggered, or the [`Shutdown`] was
    /// dropped.
    pub async fn wait(&mut self) {
        // An Err means the sender is gone, which is treated as shutdown too.
        let _ = self.rx.wait_for(|triggered| *triggered).await;
    }

    /// Returns whether shutdown has already been triggered.
    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_listener_is_not_triggered_initially() {
        let shutdown = Shutdown::new();
        assert!(!shutdown.listener().is_triggered());
    }

    #[tokio::test]
    async fn test_wait_resolves_after_trigger_from_another_task() {
        // Arrange
        let shutdown = Shutdown::new();
        let mut listener = shutdown.listener();

        // Act
        let waiter = tokio::spawn(async move {
            listener.wait().await;
            listener.is_triggered()
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        shutdown.trigger();

        // Assert
        let triggered = tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("wait must resolve after trigger")
            .expect("task panicked");
        assert!(triggered);
    }

    #[tokio::test]
    async fn test_trigger_on_fires_when_signal_arrives() {
        let shutdown = Shutdown::new();
        let mut listener = shutdown.listener();

        tokio::spawn(shutdown.trigger_on(async { Ok(()) }));

        tokio::time::timeout(Duration::from_secs(1), listener.wait())
            .await
            .expect("signal must trigger shutdown");
        assert!(listener.is_triggered());
    }

    #[tokio::test]
    async fn test_trigger_on_failed_signal_does_not_shut_down() {
        // Arrange – the signal handler cannot be installed
        let shutdown = Shutdown::new();
        let mut listener = shutdown.listener();

        // Act
        let handler = tokio::spawn(shutdown.trigger_on(async {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "no signal support"))
        }));
        let waited = tokio::time::timeout(Duration::from_millis(50), listener.wait()).await;

        // Assert – listeners keep waiting; the sender is still alive
        assert!(waited.is_err(), "a failed signal must not stop the node");
        assert!(!listener.is_triggered());
        assert!(!handler.is_finished());
        handler.abort();
    }

    #[tokio::test]
    async fn test_wait_resolves_when_sender_dropped() {
        let shutdown = Shutdown::new();
        let mut listener = shutdown.listener();
        drop(shutdown);

        tokio::time::timeout(Duration::from_secs(1), listener.wait())
            .await
            .expect("dropping the sender must release waiters");
    }
}
