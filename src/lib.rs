//! # sortrace
//!
//! Quicksort and merge sort animated side by side.
//!
//! Both sorts are ordinary recursive algorithms, except that every swap or
//! placement draws the array and then suspends for one step delay. The two
//! drivers run concurrently on a single thread, share one cancellation token
//! per run, and consult a shared playback controller for pause and speed.
//!
//! ## Example
//!
//! ```rust
//! use sortrace::prelude::*;
//!
//! # tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(async {
//! let config = VizConfig::builder().size(8).seed(42).build();
//! let mut orchestrator = Orchestrator::new(&config).with_playback(PlaybackController::instant());
//!
//! let run = orchestrator.start_sort().unwrap();
//! let report = run.execute(&mut NullSurface, &mut NullSurface).await;
//! assert!(report.is_complete());
//! # });
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::missing_const_for_fn,  // Many functions can't be const in stable Rust
    clippy::future_not_send,       // Drivers are polled on one thread
)]

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{VizConfig, VizConfigBuilder};
    pub use crate::engine::{
        delay, merge_sort, quick_sort, FrameRecorder, Lane, LaneOutcome, NullSurface,
        Orchestrator, PlaybackController, RenderSurface, RunReport, RunToken, SortRun,
        StepContext,
    };
    pub use crate::error::{SortError, SortResult};
}

/// Re-export for public API
pub use error::{SortError, SortResult};
