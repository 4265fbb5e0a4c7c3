//! Sort race TUI application state and logic.
//!
//! This module contains the testable state for the side-by-side sort
//! animation. Terminal I/O is handled by the `sort-tui` binary; runs are
//! spawned on the binary's single-threaded runtime and stream their frames
//! back through an [`AppEvent`] channel.

use crossterm::event::KeyCode;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::VizConfig;
use crate::engine::{
    ChannelSurface, Lane, LaneFrame, Orchestrator, RenderSurface, RunReport, SortRun,
};

/// Messages from running sorts to the UI loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// A driver drew a step.
    Frame(LaneFrame),
    /// Both drivers of a run stopped.
    Finished(RunReport),
}

impl From<LaneFrame> for AppEvent {
    fn from(frame: LaneFrame) -> Self {
        Self::Frame(frame)
    }
}

/// What the binary must do after a key press.
#[derive(Debug)]
pub enum KeyAction {
    /// Nothing beyond redrawing.
    None,
    /// Spawn this run (see [`spawn_run`]).
    Launch(SortRun),
}

/// Coarse state shown in the status pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppStatus {
    /// Waiting for a sort request.
    Ready,
    /// A run is animating.
    Sorting,
    /// A run is in progress but held by the pause flag.
    Paused,
    /// The last run finished and both lanes are sorted.
    Sorted,
}

impl AppStatus {
    /// Label for the status pane.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ready => "READY",
            Self::Sorting => "SORTING",
            Self::Paused => "PAUSED",
            Self::Sorted => "SORTED",
        }
    }
}

/// What one lane currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneView {
    /// Which lane.
    pub lane: Lane,
    /// Bar heights.
    pub elements: Vec<u32>,
    /// Bars touched by the latest step.
    pub highlighted: Vec<usize>,
    /// Steps drawn since the lane was last reset.
    pub steps: u64,
}

impl LaneView {
    /// Create a view showing `elements` with nothing highlighted.
    #[must_use]
    pub fn new(lane: Lane, elements: &[u32]) -> Self {
        Self {
            lane,
            elements: elements.to_vec(),
            highlighted: Vec::new(),
            steps: 0,
        }
    }

    /// Returns true if bar `index` is highlighted.
    #[must_use]
    pub fn is_highlighted(&self, index: usize) -> bool {
        self.highlighted.contains(&index)
    }
}

impl RenderSurface for LaneView {
    fn draw(&mut self, elements: &[u32], highlighted: &[usize]) {
        self.elements.clear();
        self.elements.extend_from_slice(elements);
        self.highlighted.clear();
        self.highlighted.extend_from_slice(highlighted);
        self.steps += 1;
    }
}

/// Application state for the sort race TUI.
#[derive(Debug)]
pub struct SortApp {
    /// Run coordination and datasets.
    pub orchestrator: Orchestrator,
    /// Quicksort pane.
    pub quick: LaneView,
    /// Merge sort pane.
    pub merge: LaneView,
    /// Upper bound of bar heights, for chart scaling.
    pub value_ceiling: u32,
    /// Report of the current run once it finished.
    pub last_report: Option<RunReport>,
    /// UI ticks rendered.
    pub frame_count: u64,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl SortApp {
    /// Create the application from a validated configuration.
    #[must_use]
    pub fn new(config: &VizConfig) -> Self {
        Self::with_orchestrator(Orchestrator::new(config), config.dataset.max_value)
    }

    /// Create the application around an existing orchestrator.
    #[must_use]
    pub fn with_orchestrator(orchestrator: Orchestrator, value_ceiling: u32) -> Self {
        let quick = LaneView::new(Lane::Quick, orchestrator.dataset(Lane::Quick));
        let merge = LaneView::new(Lane::Merge, orchestrator.dataset(Lane::Merge));
        Self {
            orchestrator,
            quick,
            merge,
            value_ceiling,
            last_report: None,
            frame_count: 0,
            should_quit: false,
        }
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyCode) -> KeyAction {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.shutdown();
                self.should_quit = true;
            }
            KeyCode::Char('s') | KeyCode::Enter => {
                if let Some(run) = self.start_sort() {
                    return KeyAction::Launch(run);
                }
            }
            KeyCode::Char('r') => self.randomize(),
            KeyCode::Char(' ' | 'p') => {
                self.orchestrator.toggle_pause();
            }
            KeyCode::Char('+' | '=') => {
                self.orchestrator.playback().speed_up();
            }
            KeyCode::Char('-') => {
                self.orchestrator.playback().slow_down();
            }
            _ => {}
        }
        KeyAction::None
    }

    /// Request a sort run. `None` if one is already in progress.
    pub fn start_sort(&mut self) -> Option<SortRun> {
        let run = self.orchestrator.start_sort()?;
        self.quick.steps = 0;
        self.merge.steps = 0;
        self.last_report = None;
        Some(run)
    }

    /// Cancel any run and show a fresh pair of datasets.
    pub fn randomize(&mut self) {
        self.orchestrator.randomize(&mut self.quick, &mut self.merge);
        self.quick.steps = 0;
        self.merge.steps = 0;
        self.last_report = None;
    }

    /// Apply a message from a running sort.
    ///
    /// Anything from a run other than the current one is stale and dropped.
    pub fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::Frame(frame) => {
                if self.orchestrator.active_run_id() != Some(frame.run_id) {
                    return;
                }
                let view = match frame.lane {
                    Lane::Quick => &mut self.quick,
                    Lane::Merge => &mut self.merge,
                };
                view.draw(&frame.frame.elements, &frame.frame.highlighted);
            }
            AppEvent::Finished(report) => {
                if self.orchestrator.active_run_id() != Some(report.run_id) {
                    return;
                }
                self.orchestrator.finish(&report);
                if report.is_complete() {
                    self.quick.highlighted.clear();
                    self.merge.highlighted.clear();
                }
                self.last_report = Some(report);
            }
        }
    }

    /// Count one rendered UI frame.
    pub fn tick(&mut self) {
        self.frame_count += 1;
    }

    /// Cancel any in-flight run.
    pub fn shutdown(&mut self) {
        self.orchestrator.cancel();
    }

    /// Check if the app should quit.
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Current coarse status.
    #[must_use]
    pub fn status(&self) -> AppStatus {
        if self.orchestrator.is_sorting() {
            if self.orchestrator.is_paused() {
                AppStatus::Paused
            } else {
                AppStatus::Sorting
            }
        } else if self.last_report.as_ref().is_some_and(RunReport::is_complete) {
            AppStatus::Sorted
        } else {
            AppStatus::Ready
        }
    }

    /// View for `lane`.
    #[must_use]
    pub const fn view(&self, lane: Lane) -> &LaneView {
        match lane {
            Lane::Quick => &self.quick,
            Lane::Merge => &self.merge,
        }
    }
}

/// Spawn `run` on the current runtime, streaming frames and the final report
/// to `tx`.
pub fn spawn_run(run: SortRun, tx: mpsc::UnboundedSender<AppEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let run_id = run.id();
        let mut quick = ChannelSurface::new(run_id, Lane::Quick, tx.clone());
        let mut merge = ChannelSurface::new(run_id, Lane::Merge, tx.clone());
        let report = run.execute(&mut quick, &mut merge).await;
        // Receiver gone means the UI already exited.
        let _ = tx.send(AppEvent::Finished(report));
    })
}
