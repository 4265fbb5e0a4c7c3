//! TUI module for sortrace.
//!
//! This module contains the reusable TUI application state. The actual
//! terminal I/O remains in `src/bin/sort_tui.rs`, but all testable state
//! management lives here.

#[cfg(feature = "tui")]
pub mod sort_app;

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used)]
#[cfg(feature = "tui")]
mod tests;
