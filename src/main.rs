//! sortrace CLI
//!
//! Headless entry point. The animated terminal UI is the `sort-tui` binary.

use std::process::ExitCode;

use clap::Parser;
use sortrace::cli::{run_cli, Args};
use sortrace::logging::{init_logging, LogConfig};

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging(LogConfig {
        verbose: args.verbose,
        tui_mode: false,
    }) {
        eprintln!("Warning: {e}");
    }

    run_cli(args)
}
