//! Run orchestrator.
//!
//! Owns both lane datasets and the playback controller. A sort request
//! launches quicksort and merge sort concurrently under one fresh
//! [`RunToken`]; a randomize request cancels that token and reseeds both
//! lanes from a single base array.
//!
//! At most one token is live at a time. A cancelled run may still be winding
//! down when the next one starts; the two never share state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;

use crate::config::VizConfig;
use crate::engine::cancel::RunToken;
use crate::engine::dataset::DatasetGenerator;
use crate::engine::driver::{DriverStats, StepContext};
use crate::engine::mergesort::merge_sort;
use crate::engine::playback::PlaybackController;
use crate::engine::quicksort::quick_sort;
use crate::engine::rng::SortRng;
use crate::engine::surface::{Lane, RenderSurface};
use crate::error::SortResult;

/// How a lane's driver ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LaneOutcome {
    /// The driver ran to completion.
    Completed,
    /// The run token fired before the driver finished.
    Cancelled,
}

impl LaneOutcome {
    /// Swallow the driver's result, logging anything that is not a clean finish.
    fn from_result(lane: Lane, run_id: u64, result: SortResult<()>) -> Self {
        match result {
            Ok(()) => Self::Completed,
            Err(err) if err.is_cancelled() => {
                tracing::info!(run = run_id, %lane, "sorting aborted");
                Self::Cancelled
            }
            Err(err) => {
                tracing::warn!(run = run_id, %lane, error = %err, "driver stopped");
                Self::Cancelled
            }
        }
    }
}

/// Result of one lane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaneReport {
    /// Which lane.
    pub lane: Lane,
    /// How the driver ended.
    pub outcome: LaneOutcome,
    /// Step counters.
    pub stats: DriverStats,
    /// Array contents when the driver stopped.
    pub data: Vec<u32>,
}

/// Result of one sort run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Run identifier (matches the token id).
    pub run_id: u64,
    /// Quicksort lane.
    pub quick: LaneReport,
    /// Merge sort lane.
    pub merge: LaneReport,
    /// Wall-clock time from start until both drivers stopped.
    pub elapsed: Duration,
}

impl RunReport {
    /// Returns true if both drivers ran to completion.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.quick.outcome == LaneOutcome::Completed
            && self.merge.outcome == LaneOutcome::Completed
    }

    /// Returns true if either driver was cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        !self.is_complete()
    }

    /// Report for `lane`.
    #[must_use]
    pub const fn lane(&self, lane: Lane) -> &LaneReport {
        match lane {
            Lane::Quick => &self.quick,
            Lane::Merge => &self.merge,
        }
    }
}

/// Marks a run finished when dropped, whether it completed, was cancelled,
/// or was dropped without ever being executed.
#[derive(Debug)]
struct FinishGuard(Arc<AtomicBool>);

impl Drop for FinishGuard {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Release);
    }
}

/// The orchestrator's record of the live run.
#[derive(Debug)]
struct ActiveRun {
    token: RunToken,
    finished: Arc<AtomicBool>,
}

impl ActiveRun {
    fn in_progress(&self) -> bool {
        !self.finished.load(Ordering::Acquire)
    }
}

/// A launched sort run, ready to be awaited or spawned.
#[derive(Debug)]
pub struct SortRun {
    token: RunToken,
    playback: PlaybackController,
    quick: Vec<u32>,
    merge: Vec<u32>,
    _guard: FinishGuard,
}

impl SortRun {
    /// Identifier of this run.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.token.id()
    }

    /// The token shared by both drivers.
    #[must_use]
    pub const fn token(&self) -> &RunToken {
        &self.token
    }

    /// Run both drivers concurrently and wait for both to stop.
    ///
    /// Cancellation is swallowed here: each lane reports
    /// [`LaneOutcome::Cancelled`] and the run returns normally.
    pub async fn execute(
        mut self,
        quick_surface: &mut dyn RenderSurface,
        merge_surface: &mut dyn RenderSurface,
    ) -> RunReport {
        let run_id = self.token.id();
        let started = Instant::now();
        tracing::info!(run = run_id, len = self.quick.len(), "sort run started");

        let mut quick_ctx = StepContext::new(&self.token, &self.playback, quick_surface);
        let mut merge_ctx = StepContext::new(&self.token, &self.playback, merge_surface);
        let (quick_result, merge_result) = tokio::join!(
            quick_sort(&mut self.quick, &mut quick_ctx),
            merge_sort(&mut self.merge, &mut merge_ctx),
        );
        let (quick_stats, merge_stats) = (quick_ctx.stats(), merge_ctx.stats());

        let report = RunReport {
            run_id,
            quick: LaneReport {
                lane: Lane::Quick,
                outcome: LaneOutcome::from_result(Lane::Quick, run_id, quick_result),
                stats: quick_stats,
                data: std::mem::take(&mut self.quick),
            },
            merge: LaneReport {
                lane: Lane::Merge,
                outcome: LaneOutcome::from_result(Lane::Merge, run_id, merge_result),
                stats: merge_stats,
                data: std::mem::take(&mut self.merge),
            },
            elapsed: started.elapsed(),
        };

        tracing::info!(
            run = run_id,
            complete = report.is_complete(),
            elapsed_ms = report.elapsed.as_millis(),
            quick_steps = report.quick.stats.draws,
            merge_steps = report.merge.stats.draws,
            "sort run finished"
        );
        report
    }
}

/// Coordinates sort runs over the two lane datasets.
#[derive(Debug)]
pub struct Orchestrator {
    generator: DatasetGenerator,
    rng: SortRng,
    playback: PlaybackController,
    quick: Vec<u32>,
    merge: Vec<u32>,
    active: Option<ActiveRun>,
    next_run_id: u64,
}

impl Orchestrator {
    /// Create an orchestrator and generate the first pair of datasets.
    #[must_use]
    pub fn new(config: &VizConfig) -> Self {
        let rng = SortRng::from_optional_seed(config.dataset.seed);
        tracing::info!(seed = rng.seed(), size = config.dataset.size, "dataset generator seeded");
        let mut orchestrator = Self {
            generator: DatasetGenerator::from_config(&config.dataset),
            rng,
            playback: PlaybackController::from_config(&config.playback),
            quick: Vec::new(),
            merge: Vec::new(),
            active: None,
            next_run_id: 1,
        };
        orchestrator.reseed();
        orchestrator
    }

    /// Create an orchestrator over a fixed input instead of a generated one.
    ///
    /// Both lanes start from `values`; randomize still draws from `config`.
    #[must_use]
    pub fn with_dataset(config: &VizConfig, values: Vec<u32>) -> Self {
        let mut orchestrator = Self::new(config);
        orchestrator.quick.clone_from(&values);
        orchestrator.merge = values;
        orchestrator
    }

    /// Replace the playback controller (e.g. with [`PlaybackController::instant`]).
    #[must_use]
    pub fn with_playback(mut self, playback: PlaybackController) -> Self {
        self.playback = playback;
        self
    }

    /// Start a sort run, unless one is already in progress.
    ///
    /// Returns `None` when the request is ignored. The returned run holds
    /// copies of both datasets; execute it to animate them.
    pub fn start_sort(&mut self) -> Option<SortRun> {
        if let Some(active) = self.active.as_ref().filter(|a| a.in_progress()) {
            tracing::debug!(run = active.token.id(), "sort request ignored: run in progress");
            return None;
        }

        let token = RunToken::new(self.next_run_id);
        self.next_run_id += 1;
        let finished = Arc::new(AtomicBool::new(false));
        self.active = Some(ActiveRun {
            token: token.clone(),
            finished: Arc::clone(&finished),
        });

        Some(SortRun {
            token,
            playback: self.playback.clone(),
            quick: self.quick.clone(),
            merge: self.merge.clone(),
            _guard: FinishGuard(finished),
        })
    }

    /// Cancel any in-flight run, regenerate both datasets, and draw them unsorted.
    pub fn randomize(
        &mut self,
        quick_surface: &mut dyn RenderSurface,
        merge_surface: &mut dyn RenderSurface,
    ) {
        self.cancel();
        self.reseed();
        quick_surface.draw(&self.quick, &[]);
        merge_surface.draw(&self.merge, &[]);
    }

    /// Cancel the live run, if any. Its drivers stop at their next checkpoint.
    pub fn cancel(&mut self) {
        if let Some(active) = self.active.take() {
            if active.in_progress() {
                active.token.cancel();
                tracing::info!(run = active.token.id(), "run cancelled");
            }
        }
    }

    /// Adopt the arrays of a completed run so the next sort continues from them.
    ///
    /// Reports from cancelled or superseded runs are ignored.
    pub fn finish(&mut self, report: &RunReport) {
        if self.active_run_id() != Some(report.run_id) || !report.is_complete() {
            return;
        }
        self.quick.clone_from(&report.quick.data);
        self.merge.clone_from(&report.merge.data);
    }

    fn reseed(&mut self) {
        let base = self.generator.generate(&mut self.rng);
        self.quick.clone_from(&base);
        self.merge = base;
    }

    /// Returns true while a run is in progress.
    #[must_use]
    pub fn is_sorting(&self) -> bool {
        self.active.as_ref().is_some_and(ActiveRun::in_progress)
    }

    /// Id of the most recently started run that has not been cancelled.
    #[must_use]
    pub fn active_run_id(&self) -> Option<u64> {
        self.active.as_ref().map(|a| a.token.id())
    }

    /// Shared playback controller.
    #[must_use]
    pub const fn playback(&self) -> &PlaybackController {
        &self.playback
    }

    /// Flip the pause flag; returns the new state.
    pub fn toggle_pause(&self) -> bool {
        self.playback.toggle_pause()
    }

    /// Returns true while playback is paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.playback.is_paused()
    }

    /// Set the speed; returns the clamped value applied.
    pub fn set_speed(&self, speed: u32) -> u32 {
        self.playback.set_speed(speed)
    }

    /// Current speed in steps per second.
    #[must_use]
    pub fn speed(&self) -> u32 {
        self.playback.speed()
    }

    /// Dataset for `lane` as it stands outside any run.
    #[must_use]
    pub fn dataset(&self, lane: Lane) -> &[u32] {
        match lane {
            Lane::Quick => &self.quick,
            Lane::Merge => &self.merge,
        }
    }

    /// Seed of the dataset generator.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.rng.seed()
    }
}
