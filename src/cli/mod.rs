//! CLI module for sortrace.
//!
//! All CLI logic lives here so `main.rs` stays a thin shell and the
//! handlers can be tested directly.

mod args;
mod commands;
mod output;

pub use args::{Args, Command, RunArgs, RunOptions};
pub use commands::{execute_headless, run_cli, validate_config, HeadlessRun};
pub use output::{format_run_json, format_run_report, lane_verified, print_run_report, RunSummary};
