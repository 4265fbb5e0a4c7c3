//! Tracing setup shared by the sortrace binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::error::{SortError, SortResult};

const DEFAULT_LOG_FILTER: &str = "sortrace=info";
const VERBOSE_LOG_FILTER: &str = "sortrace=debug";

/// Logging configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogConfig {
    /// Raise the default level to `debug`.
    pub verbose: bool,
    /// The terminal UI owns the screen: stay silent unless `RUST_LOG` asks otherwise.
    pub tui_mode: bool,
}

/// Pick the filter: `RUST_LOG` wins, then the mode defaults.
fn build_filter(config: LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config.tui_mode {
            EnvFilter::new("off")
        } else if config.verbose {
            EnvFilter::new(VERBOSE_LOG_FILTER)
        } else {
            EnvFilter::new(DEFAULT_LOG_FILTER)
        }
    })
}

/// Install a stderr `fmt` subscriber.
///
/// # Errors
///
/// Returns error if a global subscriber is already installed.
pub fn init_logging(config: LogConfig) -> SortResult<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(build_filter(config)),
        )
        .try_init()
        .map_err(|e| SortError::logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_defaults() {
        // RUST_LOG may be set by the harness; only check the mode fallbacks render.
        let quiet = build_filter(LogConfig {
            verbose: false,
            tui_mode: true,
        });
        let verbose = build_filter(LogConfig {
            verbose: true,
            tui_mode: false,
        });
        assert!(!quiet.to_string().is_empty());
        assert!(!verbose.to_string().is_empty());
    }

    #[test]
    fn test_second_init_fails() {
        let _ = init_logging(LogConfig::default());
        let again = init_logging(LogConfig::default());
        assert!(matches!(again, Err(SortError::Logging(_))));
    }
}
