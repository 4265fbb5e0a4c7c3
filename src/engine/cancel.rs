//! Run tokens: cooperative cancellation shared by both drivers of one run.
//!
//! A token is created per sort run and never reused once cancelled. Drivers
//! consult it at checkpoints; suspended delays are woken as soon as it fires.

use std::sync::Arc;

use tokio::sync::watch;

use crate::error::{SortError, SortResult};

/// Cancellation handle for a single sort run.
///
/// Clones share state, so cancelling any clone cancels all of them.
#[derive(Debug, Clone)]
pub struct RunToken {
    id: u64,
    cancelled: Arc<watch::Sender<bool>>,
}

impl RunToken {
    /// Create a live token for run `id`.
    #[must_use]
    pub fn new(id: u64) -> Self {
        let (tx, _) = watch::channel(false);
        Self {
            id,
            cancelled: Arc::new(tx),
        }
    }

    /// Identifier of the run this token belongs to.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        let was_cancelled = self.cancelled.send_replace(true);
        if !was_cancelled {
            tracing::debug!(run = self.id, "run token cancelled");
        }
    }

    /// Returns true once `cancel` has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.cancelled.borrow()
    }

    /// Checkpoint: fail with [`SortError::Cancelled`] if the token fired.
    ///
    /// # Errors
    ///
    /// Returns `Cancelled` when the token has been cancelled.
    pub fn checkpoint(&self) -> SortResult<()> {
        if self.is_cancelled() {
            Err(SortError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Resolve once the token is cancelled.
    pub async fn cancelled(&self) {
        let mut rx = self.cancelled.subscribe();
        // The sender lives as long as `self`, so this only ends on cancel.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_new_token_is_live() {
        let token = RunToken::new(3);
        assert_eq!(token.id(), 3);
        assert!(!token.is_cancelled());
        assert!(token.checkpoint().is_ok());
    }

    #[test]
    fn test_cancel_sets_state() {
        let token = RunToken::new(1);
        token.cancel();
        assert!(token.is_cancelled());
        assert!(matches!(token.checkpoint(), Err(SortError::Cancelled)));
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let token = RunToken::new(1);
        token.cancel();
        token.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_clones_share_state() {
        let token = RunToken::new(1);
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_distinct_tokens_are_independent() {
        let first = RunToken::new(1);
        let second = RunToken::new(2);
        first.cancel();
        assert!(!second.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_wakes_waiter() {
        let token = RunToken::new(1);
        let waiter = {
            let token = token.clone();
            tokio::spawn(async move { token.cancelled().await })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!waiter.is_finished());

        token.cancel();
        assert!(waiter.await.is_ok());
    }

    #[tokio::test]
    async fn test_cancelled_returns_immediately_when_already_cancelled() {
        let token = RunToken::new(1);
        token.cancel();
        token.cancelled().await;
    }
}
