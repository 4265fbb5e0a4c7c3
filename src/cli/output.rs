//! CLI output formatting.
//!
//! Formatting is split from printing so the text can be tested.

use serde::Serialize;

use crate::engine::{is_non_decreasing, same_multiset, Lane, LaneOutcome, LaneReport, RunReport};
use crate::error::SortResult;

/// Whether a lane's output is sorted and a permutation of its input.
#[must_use]
pub fn lane_verified(lane: &LaneReport, input: &[u32]) -> bool {
    lane.outcome == LaneOutcome::Completed
        && is_non_decreasing(&lane.data)
        && same_multiset(&lane.data, input)
}

/// Render a run report.
///
/// # Arguments
///
/// * `report` - The finished run
/// * `input` - The dataset both lanes started from
/// * `seed` - Seed the dataset was generated with
#[must_use]
pub fn format_run_report(report: &RunReport, input: &[u32], seed: u64) -> String {
    let rule = "━".repeat(64);
    let mut out = String::new();
    out.push_str(&format!("{rule}\n"));
    out.push_str(&format!("Run:  {}\n", report.run_id));
    out.push_str(&format!("Seed: {seed}\n"));
    out.push_str(&format!("Size: {}\n", input.len()));
    out.push_str(&format!("Time: {:.3}s\n", report.elapsed.as_secs_f64()));
    out.push_str(&format!("{rule}\n"));

    for lane in Lane::ALL {
        let lane_report = report.lane(lane);
        let verified = lane_verified(lane_report, input);
        let symbol = if verified { "✓" } else { "✗" };
        let outcome = match lane_report.outcome {
            LaneOutcome::Completed => "completed",
            LaneOutcome::Cancelled => "cancelled",
        };
        out.push_str(&format!("\n{symbol} {lane} ({outcome})\n"));
        out.push_str(&format!("  Comparisons: {}\n", lane_report.stats.comparisons));
        out.push_str(&format!("  Writes:      {}\n", lane_report.stats.writes));
        out.push_str(&format!("  Steps:       {}\n", lane_report.stats.draws));
        out.push_str(&format!(
            "  Sorted:      {}\n",
            if verified { "YES" } else { "NO" }
        ));
    }

    out
}

/// Machine-readable form of a run report, printed by `run --json`.
#[derive(Debug, Serialize)]
pub struct RunSummary<'a> {
    /// Run identifier.
    pub run_id: u64,
    /// Dataset seed.
    pub seed: u64,
    /// Bars per lane.
    pub size: usize,
    /// Wall-clock run time in seconds.
    pub elapsed_secs: f64,
    /// Both lanes completed sorted.
    pub verified: bool,
    /// Quicksort lane.
    pub quick: &'a LaneReport,
    /// Merge sort lane.
    pub merge: &'a LaneReport,
}

impl<'a> RunSummary<'a> {
    /// Summarize `report` against the dataset both lanes started from.
    #[must_use]
    pub fn new(report: &'a RunReport, input: &[u32], seed: u64) -> Self {
        Self {
            run_id: report.run_id,
            seed,
            size: input.len(),
            elapsed_secs: report.elapsed.as_secs_f64(),
            verified: Lane::ALL
                .iter()
                .all(|&lane| lane_verified(report.lane(lane), input)),
            quick: &report.quick,
            merge: &report.merge,
        }
    }
}

/// Render a run report as pretty-printed JSON.
///
/// # Errors
///
/// Returns error if serialization fails.
pub fn format_run_json(report: &RunReport, input: &[u32], seed: u64) -> SortResult<String> {
    Ok(serde_json::to_string_pretty(&RunSummary::new(report, input, seed))?)
}

/// Print a run report to stdout.
pub fn print_run_report(report: &RunReport, input: &[u32], seed: u64) {
    print!("{}", format_run_report(report, input, seed));
}
