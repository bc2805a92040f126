//! Cancellation handles for running countdowns.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::AbortHandle;

#[derive(Debug, Default)]
struct CancelState {
    cancelled: AtomicBool,
    task: Mutex<Option<AbortHandle>>,
}

/// Owner's handle to a running countdown.
///
/// Cancelling is idempotent. Dropping the handle cancels the countdown,
/// so a countdown can never outlive the round that owns it.
#[derive(Debug)]
pub struct CancelHandle {
    state: Arc<CancelState>,
}

impl CancelHandle {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(CancelState::default()),
        }
    }

    /// Read-only view for the ticking side.
    #[must_use]
    pub fn token(&self) -> CancelToken {
        CancelToken {
            state: Arc::clone(&self.state),
        }
    }

    /// Tie a background task to this handle. Aborts it at once if the
    /// handle was already cancelled.
    pub fn attach_task(&self, task: AbortHandle) {
        if self.is_cancelled() {
            task.abort();
            return;
        }
        *self.state.task.lock() = Some(task);
        // cancel() may have run between the check and the store
        if self.is_cancelled() {
            if let Some(task) = self.state.task.lock().take() {
                task.abort();
            }
        }
    }

    /// Stop further ticks.
    ///
    /// Returns `true` only for the call that actually cancelled.
    pub fn cancel(&self) -> bool {
        if self.state.cancelled.swap(true, Ordering::AcqRel) {
            return false;
        }
        if let Some(task) = self.state.task.lock().take() {
            task.abort();
        }
        true
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.load(Ordering::Acquire)
    }
}

impl Default for CancelHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CancelHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Cancellation flag observed by a ticking countdown.
#[derive(Clone, Debug)]
pub struct CancelToken {
    state: Arc<CancelState>,
}

impl CancelToken {
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_is_idempotent() {
        let handle = CancelHandle::new();
        let token = handle.token();

        assert!(!handle.is_cancelled());
        assert!(handle.cancel());
        assert!(!handle.cancel());
        assert!(handle.is_cancelled());
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_drop_cancels() {
        let handle = CancelHandle::new();
        let token = handle.token();

        drop(handle);
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn test_attach_after_cancel_aborts_task() {
        let handle = CancelHandle::new();
        handle.cancel();

        let task = tokio::spawn(std::future::pending::<()>());
        handle.attach_task(task.abort_handle());

        let err = task.await.unwrap_err();
        assert!(err.is_cancelled());
    }
}
