//! CLI command handlers.

use std::path::Path;
use std::process::ExitCode;

use crate::config::VizConfig;
use crate::engine::{Lane, Orchestrator, PlaybackController, RunReport, TraceSurface};
use crate::error::{SortError, SortResult};

use super::output::{format_run_json, lane_verified, print_run_report};
use super::{Args, Command, RunArgs, RunOptions};

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    let result = match args.command {
        Command::Run(args) => run_headless(&args),
        Command::Validate { path } => validate_config(&path),
        Command::DefaultConfig => print_default_config(),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Outcome of a headless run.
#[derive(Debug, Clone)]
pub struct HeadlessRun {
    /// The dataset both lanes started from.
    pub input: Vec<u32>,
    /// Seed the dataset came from.
    pub seed: u64,
    /// Report of the finished run.
    pub report: RunReport,
}

impl HeadlessRun {
    /// Returns true if both lanes finished sorted.
    #[must_use]
    pub fn verified(&self) -> bool {
        Lane::ALL
            .iter()
            .all(|&lane| lane_verified(self.report.lane(lane), &self.input))
    }
}

/// Race both drivers on one dataset, on a single-threaded runtime.
///
/// # Errors
///
/// Returns error if the configuration is invalid or the runtime cannot start.
pub fn execute_headless(options: &RunOptions) -> SortResult<HeadlessRun> {
    let config = options.resolve()?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(race(&config, options.instant))
}

async fn race(config: &VizConfig, instant: bool) -> SortResult<HeadlessRun> {
    let mut orchestrator = Orchestrator::new(config);
    if instant {
        orchestrator = orchestrator.with_playback(PlaybackController::instant());
    }
    let input = orchestrator.dataset(Lane::Quick).to_vec();
    let seed = orchestrator.seed();

    let Some(run) = orchestrator.start_sort() else {
        return Err(SortError::config("a sort run is already in progress"));
    };
    let mut quick = TraceSurface::new(Lane::Quick);
    let mut merge = TraceSurface::new(Lane::Merge);
    let report = run.execute(&mut quick, &mut merge).await;
    orchestrator.finish(&report);

    Ok(HeadlessRun {
        input,
        seed,
        report,
    })
}

fn run_headless(args: &RunArgs) -> SortResult<ExitCode> {
    let run = execute_headless(&args.options)?;
    if args.json {
        println!("{}", format_run_json(&run.report, &run.input, run.seed)?);
    } else {
        print_run_report(&run.report, &run.input, run.seed);
    }
    Ok(if run.verified() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Validate a configuration file and report the result.
///
/// # Errors
///
/// Returns error if the file cannot be read, parsed, or validated.
pub fn validate_config(path: &Path) -> SortResult<ExitCode> {
    let config = VizConfig::load(path)?;
    println!("✓ {} is valid", path.display());
    println!(
        "  {} bars in [{}, {}), speed {} (range {}..={})",
        config.dataset.size,
        config.dataset.min_value,
        config.dataset.max_value,
        config.playback.speed,
        config.playback.speed_min,
        config.playback.speed_max,
    );
    Ok(ExitCode::SUCCESS)
}

fn print_default_config() -> SortResult<ExitCode> {
    print!("{}", VizConfig::default().to_yaml()?);
    Ok(ExitCode::SUCCESS)
}
