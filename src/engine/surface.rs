//! Render surfaces: where drivers publish each visualized step.
//!
//! A surface receives the whole array plus the indices touched by the step.
//! Drivers call it synchronously once per step, before suspending.

use serde::Serialize;
use tokio::sync::mpsc;

/// Which of the two side-by-side animations a frame belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Lane {
    /// Lomuto quicksort.
    Quick,
    /// Top-down merge sort.
    Merge,
}

impl Lane {
    /// Both lanes, in display order.
    pub const ALL: [Self; 2] = [Self::Quick, Self::Merge];

    /// Human-readable algorithm name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Quick => "Quick Sort",
            Self::Merge => "Merge Sort",
        }
    }
}

impl std::fmt::Display for Lane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Redraw target for one lane.
pub trait RenderSurface: Send {
    /// Redraw every element, highlighting `highlighted` indices.
    fn draw(&mut self, elements: &[u32], highlighted: &[usize]);
}

/// One recorded step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Array contents after the step.
    pub elements: Vec<u32>,
    /// Indices touched by the step.
    pub highlighted: Vec<usize>,
}

/// Surface that keeps every frame. Used by tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct FrameRecorder {
    frames: Vec<Frame>,
}

impl FrameRecorder {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All frames drawn so far, oldest first.
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Number of draw calls received.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns true if nothing was drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The most recent frame.
    #[must_use]
    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }
}

impl RenderSurface for FrameRecorder {
    fn draw(&mut self, elements: &[u32], highlighted: &[usize]) {
        self.frames.push(Frame {
            elements: elements.to_vec(),
            highlighted: highlighted.to_vec(),
        });
    }
}

/// Surface that discards frames.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface;

impl RenderSurface for NullSurface {
    fn draw(&mut self, _elements: &[u32], _highlighted: &[usize]) {}
}

/// Surface that emits each frame as a trace event.
#[derive(Debug, Clone, Copy)]
pub struct TraceSurface {
    lane: Lane,
}

impl TraceSurface {
    /// Create a trace surface for `lane`.
    #[must_use]
    pub const fn new(lane: Lane) -> Self {
        Self { lane }
    }
}

impl RenderSurface for TraceSurface {
    fn draw(&mut self, elements: &[u32], highlighted: &[usize]) {
        tracing::trace!(lane = %self.lane, ?highlighted, ?elements, "frame");
    }
}

/// A frame tagged with the lane and run that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneFrame {
    /// Run that drew the frame.
    pub run_id: u64,
    /// Lane the frame belongs to.
    pub lane: Lane,
    /// The frame itself.
    pub frame: Frame,
}

/// Surface that forwards frames over a channel to whoever owns the screen.
///
/// Frames carry the run id so receivers can drop those from cancelled runs.
#[derive(Debug)]
pub struct ChannelSurface<T> {
    run_id: u64,
    lane: Lane,
    tx: mpsc::UnboundedSender<T>,
}

impl<T> ChannelSurface<T> {
    /// Create a channel surface for one lane of run `run_id`.
    #[must_use]
    pub const fn new(run_id: u64, lane: Lane, tx: mpsc::UnboundedSender<T>) -> Self {
        Self { run_id, lane, tx }
    }
}

impl<T: From<LaneFrame> + Send> RenderSurface for ChannelSurface<T> {
    fn draw(&mut self, elements: &[u32], highlighted: &[usize]) {
        let frame = LaneFrame {
            run_id: self.run_id,
            lane: self.lane,
            frame: Frame {
                elements: elements.to_vec(),
                highlighted: highlighted.to_vec(),
            },
        };
        // Receiver gone means the UI shut down; nothing left to draw on.
        let _ = self.tx.send(T::from(frame));
    }
}
