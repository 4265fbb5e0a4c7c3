//! Cooperative animation engine.
//!
//! Two recursive sort drivers run as independently suspending futures on one
//! thread. Every visualized step draws on a [`RenderSurface`] and then
//! suspends through [`delay`], which is where pause, speed, and cancellation
//! are honored:
//!
//! - [`RunToken`]: per-run cooperative cancellation
//! - [`PlaybackController`]: pause flag and speed setting
//! - [`quick_sort`] / [`merge_sort`]: the animated drivers
//! - [`Orchestrator`]: starts, cancels, and reseeds runs

pub mod cancel;
pub mod dataset;
pub mod delay;
pub mod driver;
pub mod mergesort;
pub mod orchestrator;
pub mod playback;
pub mod quicksort;
pub mod rng;
pub mod surface;

pub use cancel::RunToken;
pub use dataset::{is_non_decreasing, same_multiset, DatasetGenerator};
pub use delay::delay;
pub use driver::{DriverStats, StepContext};
pub use mergesort::merge_sort;
pub use orchestrator::{LaneOutcome, LaneReport, Orchestrator, RunReport, SortRun};
pub use playback::PlaybackController;
pub use quicksort::quick_sort;
pub use rng::SortRng;
pub use surface::{
    ChannelSurface, Frame, FrameRecorder, Lane, LaneFrame, NullSurface, RenderSurface,
    TraceSurface,
};
