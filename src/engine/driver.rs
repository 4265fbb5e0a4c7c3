//! Step plumbing shared by the animated sort drivers.
//!
//! A [`StepContext`] bundles what every visualized step needs: the run token
//! for checkpoints, the playback controller for the step delay, and the
//! surface to draw on. It also counts what the driver did.

use std::future::Future;
use std::pin::Pin;

use serde::Serialize;

use crate::engine::cancel::RunToken;
use crate::engine::delay::delay;
use crate::engine::playback::PlaybackController;
use crate::engine::surface::RenderSurface;
use crate::error::SortResult;

/// Boxed future returned by recursive driver calls.
pub type StepFuture<'a, T = ()> = Pin<Box<dyn Future<Output = SortResult<T>> + Send + 'a>>;

/// Counters for one driver run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DriverStats {
    /// Element comparisons.
    pub comparisons: u64,
    /// Array writes: swaps for quicksort, placements for merge sort.
    pub writes: u64,
    /// Surface redraws (one per visualized step).
    pub draws: u64,
}

/// Per-driver execution context.
pub struct StepContext<'a> {
    token: &'a RunToken,
    playback: &'a PlaybackController,
    surface: &'a mut dyn RenderSurface,
    stats: DriverStats,
}

impl<'a> StepContext<'a> {
    /// Create a context drawing on `surface` under `token`.
    pub fn new(
        token: &'a RunToken,
        playback: &'a PlaybackController,
        surface: &'a mut dyn RenderSurface,
    ) -> Self {
        Self {
            token,
            playback,
            surface,
            stats: DriverStats::default(),
        }
    }

    /// Checkpoint against the run token.
    ///
    /// # Errors
    ///
    /// Returns `Cancelled` when the token has fired.
    pub fn checkpoint(&self) -> SortResult<()> {
        self.token.checkpoint()
    }

    /// Record one comparison.
    pub fn compared(&mut self) {
        self.stats.comparisons += 1;
    }

    /// Record one array write.
    pub fn wrote(&mut self) {
        self.stats.writes += 1;
    }

    /// Draw the current array and suspend for one step delay.
    ///
    /// The delay is read from the playback controller here, when the
    /// suspension begins.
    ///
    /// # Errors
    ///
    /// Returns `Cancelled` if the token fires before or during the delay.
    pub async fn show(&mut self, elements: &[u32], highlighted: &[usize]) -> SortResult<()> {
        self.surface.draw(elements, highlighted);
        self.stats.draws += 1;
        let pause = self.playback.step_delay();
        delay(pause, self.token, self.playback).await
    }

    /// Counters accumulated so far.
    #[must_use]
    pub const fn stats(&self) -> DriverStats {
        self.stats
    }
}
