//! Configuration system with YAML schema and validation.
//!
//! Every knob of the visualizer lives here: dataset shape, playback speed
//! bounds, and the terminal refresh rate. Files are parsed with `serde_yaml`,
//! checked field-by-field with `validator`, then checked for cross-field
//! consistency.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use validator::Validate;

use crate::error::{SortError, SortResult};

/// Top-level visualizer configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct VizConfig {
    /// Dataset generation.
    #[validate(nested)]
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Step delay and speed slider bounds.
    #[validate(nested)]
    #[serde(default)]
    pub playback: PlaybackConfig,

    /// Terminal display settings.
    #[validate(nested)]
    #[serde(default)]
    pub display: DisplayConfig,
}

impl VizConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> SortResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> SortResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> SortResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> VizConfigBuilder {
        VizConfigBuilder::default()
    }

    /// Run schema validation followed by semantic validation.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn check(&self) -> SortResult<()> {
        self.validate()?;
        self.validate_semantic()
    }

    /// Validate constraints that span more than one field.
    fn validate_semantic(&self) -> SortResult<()> {
        let dataset = &self.dataset;
        if dataset.min_value >= dataset.max_value {
            return Err(SortError::config(format!(
                "min_value ({}) must be below max_value ({})",
                dataset.min_value, dataset.max_value
            )));
        }

        let playback = &self.playback;
        if playback.speed_min > playback.speed_max {
            return Err(SortError::config(format!(
                "speed_min ({}) exceeds speed_max ({})",
                playback.speed_min, playback.speed_max
            )));
        }
        if !(playback.speed_min..=playback.speed_max).contains(&playback.speed) {
            return Err(SortError::config(format!(
                "speed {} outside [{}, {}]",
                playback.speed, playback.speed_min, playback.speed_max
            )));
        }

        Ok(())
    }

    /// UI refresh interval.
    #[must_use]
    pub const fn tick(&self) -> Duration {
        Duration::from_millis(self.display.tick_ms)
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct VizConfigBuilder {
    size: Option<usize>,
    seed: Option<u64>,
    speed: Option<u32>,
    value_range: Option<(u32, u32)>,
}

impl VizConfigBuilder {
    /// Set the number of bars per lane.
    #[must_use]
    pub const fn size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the dataset seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the initial speed (steps per second).
    #[must_use]
    pub const fn speed(mut self, speed: u32) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Set the half-open range bar heights are drawn from.
    #[must_use]
    pub const fn value_range(mut self, min: u32, max: u32) -> Self {
        self.value_range = Some((min, max));
        self
    }

    /// Build the configuration.
    ///
    /// The builder does not validate; call [`VizConfig::check`] on the result
    /// when the values come from user input.
    #[must_use]
    pub fn build(self) -> VizConfig {
        let mut config = VizConfig::default();

        if let Some(size) = self.size {
            config.dataset.size = size;
        }
        if self.seed.is_some() {
            config.dataset.seed = self.seed;
        }
        if let Some(speed) = self.speed {
            config.playback.speed = speed;
        }
        if let Some((min, max)) = self.value_range {
            config.dataset.min_value = min;
            config.dataset.max_value = max;
        }

        config
    }
}

/// Dataset generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct DatasetConfig {
    /// Number of bars per lane.
    #[validate(range(max = 1024))]
    pub size: usize,
    /// Smallest bar height (inclusive).
    #[validate(range(min = 1))]
    pub min_value: u32,
    /// Largest bar height (exclusive).
    pub max_value: u32,
    /// Seed for the dataset generator. Random when absent.
    pub seed: Option<u64>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            size: 60,
            min_value: 20,
            max_value: 220,
            seed: None,
        }
    }
}

/// Playback speed settings.
///
/// The per-step delay is `1000 / speed` milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct PlaybackConfig {
    /// Initial speed in steps per second.
    #[validate(range(min = 1))]
    pub speed: u32,
    /// Slowest selectable speed.
    #[validate(range(min = 1))]
    pub speed_min: u32,
    /// Fastest selectable speed.
    #[validate(range(min = 1, max = 1000))]
    pub speed_max: u32,
    /// Increment applied by one press of the speed keys.
    #[validate(range(min = 1))]
    pub speed_step: u32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            speed: 10,
            speed_min: 1,
            speed_max: 100,
            speed_step: 5,
        }
    }
}

/// Terminal display settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Redraw interval in milliseconds.
    #[validate(range(min = 1, max = 1000))]
    pub tick_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { tick_ms: 16 }
    }
}
