//! CLI argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::VizConfig;
use crate::error::SortResult;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "sortrace",
    version,
    about = "Quicksort and merge sort, animated side by side"
)]
pub struct Args {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Race both sorts on one random dataset without the terminal UI
    Run(RunArgs),
    /// Validate a YAML configuration file
    Validate {
        /// Path to the configuration file.
        path: PathBuf,
    },
    /// Print the default configuration as YAML
    DefaultConfig,
}

/// Arguments of `sortrace run`.
#[derive(Debug, Clone, Default, PartialEq, Eq, clap::Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub options: RunOptions,

    /// Print the report as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Options shared by the headless runner and the terminal UI.
#[derive(Debug, Clone, Default, PartialEq, Eq, clap::Args)]
pub struct RunOptions {
    /// YAML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of bars per lane.
    #[arg(long)]
    pub size: Option<usize>,

    /// Dataset seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Steps per second.
    #[arg(long)]
    pub speed: Option<u32>,

    /// Skip step delays entirely.
    #[arg(long)]
    pub instant: bool,
}

impl RunOptions {
    /// Load the configuration file (or defaults) and apply flag overrides.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be loaded or the result is invalid.
    pub fn resolve(&self) -> SortResult<VizConfig> {
        let mut config = match &self.config {
            Some(path) => VizConfig::load(path)?,
            None => VizConfig::default(),
        };

        if let Some(size) = self.size {
            config.dataset.size = size;
        }
        if self.seed.is_some() {
            config.dataset.seed = self.seed;
        }
        if let Some(speed) = self.speed {
            config.playback.speed = speed;
        }

        config.check()?;
        Ok(config)
    }
}
