//! Cancellation handle for in-flight paste requests.

use std::sync::Arc;

use tokio::sync::watch;

/// A clonable cancellation signal.
///
/// Pass a clone to a request with [`RequestOption::cancel`](crate::RequestOption::cancel)
/// and call [`cancel`](Self::cancel) from anywhere to abort it. Once cancelled,
/// a handle stays cancelled.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    state: Arc<watch::Sender<bool>>,
}

impl Default for CancelHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelHandle {
    /// Creates a handle that has not been cancelled.
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(false);
        Self {
            state: Arc::new(state),
        }
    }

    /// Signals cancellation to every request holding a clone of this handle.
    pub fn cancel(&self) {
        self.state.send_replace(true);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.state.borrow()
    }

    /// Completes when the handle is cancelled.
    pub async fn cancelled(&self) {
        let mut rx = self.state.subscribe();
        if rx.wait_for(|cancelled| *cancelled).await.is_err() {
            // The sender lives as long as `self`, so this cannot close.
            std::future::pending::<()>().await;
        }
    }
}
