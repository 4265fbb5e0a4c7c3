//! Error types for sortrace.
//!
//! The scheduler itself has a single runtime failure, [`SortError::Cancelled`],
//! which unwinds a driver's call chain and is swallowed by the orchestrator.
//! The remaining variants belong to the configuration and CLI surface.

use thiserror::Error;

/// Result type alias for sortrace operations.
pub type SortResult<T> = Result<T, SortError>;

/// Unified error type for all sortrace operations.
#[derive(Debug, Error)]
pub enum SortError {
    // ===== Scheduler =====
    /// The run token was cancelled at a checkpoint.
    #[error("run cancelled")]
    Cancelled,

    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// JSON report serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== I/O Errors =====
    /// File or terminal I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(String),
}

impl SortError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a logging setup error.
    #[must_use]
    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging(message.into())
    }

    /// Check if this error is the cooperative cancellation signal.
    ///
    /// Cancellation is expected control flow, never reported to the user.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_detection() {
        assert!(SortError::Cancelled.is_cancelled());
        assert!(!SortError::config("bad").is_cancelled());
        assert!(!SortError::logging("twice").is_cancelled());
    }

    #[test]
    fn test_error_display_cancelled() {
        assert_eq!(SortError::Cancelled.to_string(), "run cancelled");
    }

    #[test]
    fn test_error_config() {
        let err = SortError::config("speed out of range");
        let msg = err.to_string();
        assert!(msg.contains("Configuration error"));
        assert!(msg.contains("speed out of range"));
    }

    #[test]
    fn test_error_io() {
        let err = SortError::from(std::io::Error::other("terminal gone"));
        assert!(!err.is_cancelled());
        let msg = err.to_string();
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("terminal gone"));
    }

    #[test]
    fn test_error_yaml() {
        let parse: Result<u32, _> = serde_yaml::from_str("[not, a, number]");
        let err = SortError::from(parse.unwrap_err());
        assert!(err.to_string().contains("YAML parsing error"));
    }

    #[test]
    fn test_error_debug() {
        let err = SortError::config("test");
        let debug = format!("{err:?}");
        assert!(debug.contains("Config"));
    }
}
