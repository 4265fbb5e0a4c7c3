//! Cooperative delay primitive.
//!
//! Every visualized step ends in [`delay`]. It is the only suspension point
//! of a driver, so it is also where pause and cancellation take effect.

use std::time::Duration;

use crate::engine::cancel::RunToken;
use crate::engine::playback::PlaybackController;
use crate::error::{SortError, SortResult};

/// Suspend the calling step for `duration`.
///
/// - Fails immediately if `token` is already cancelled.
/// - While `playback` is paused, waits for resume without consuming any of
///   `duration`.
/// - Then waits the full `duration` and checks `token` once more.
///
/// A successful return never happens after `token` was cancelled and never
/// takes less than `duration`. Cancellation during either wait fails at once.
/// A zero `duration` still yields to the scheduler so concurrent drivers
/// interleave.
///
/// # Errors
///
/// Returns [`SortError::Cancelled`] when the token fires at any checkpoint.
pub async fn delay(
    duration: Duration,
    token: &RunToken,
    playback: &PlaybackController,
) -> SortResult<()> {
    token.checkpoint()?;

    if playback.is_paused() {
        tracing::trace!(run = token.id(), "step held while paused");
        tokio::select! {
            biased;
            () = token.cancelled() => return Err(SortError::Cancelled),
            () = playback.resumed() => {}
        }
    }

    if duration.is_zero() {
        tokio::task::yield_now().await;
    } else {
        tokio::select! {
            biased;
            () = token.cancelled() => return Err(SortError::Cancelled),
            () = tokio::time::sleep(duration) => {}
        }
    }

    token.checkpoint()
}
