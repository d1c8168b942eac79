//! Unified error hierarchy for VertRS
//!
//! The analytics functions are infallible over numeric input; the only
//! failures they surface are malformed record fields (dates) and bad ranges.
//! Import and configuration errors live alongside so the CLI can report every
//! failure through one type.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all VertRS operations
#[derive(Debug, Error)]
pub enum VertRsError {
    /// Malformed input record
    #[error("Invalid input: {0}")]
    Input(#[from] InputError),

    /// Import errors
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the analytics core for malformed records
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Date string is not a calendar date in `YYYY-MM-DD` form
    #[error("Invalid date in {field}: {value:?}")]
    InvalidDate { field: String, value: String },

    /// Date range with start after end
    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange { start: String, end: String },
}

/// Errors raised while reading profile and log exports
#[derive(Debug, Error)]
pub enum ImportError {
    /// Unsupported file extension
    #[error("Unsupported format: {format}")]
    UnsupportedFormat { format: String },

    /// Format-specific parsing error
    #[error("Parse error in {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    /// Required column absent from a CSV header
    #[error("Missing required column: {column}")]
    MissingColumn { column: String },
}

/// Result type alias for VertRS operations
pub type Result<T> = std::result::Result<T, VertRsError>;

impl VertRsError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            VertRsError::Input(_) => ErrorSeverity::Warning,
            VertRsError::Import(ImportError::MissingColumn { .. }) => ErrorSeverity::Warning,
            VertRsError::Import(_) => ErrorSeverity::Error,
            VertRsError::Configuration(_) => ErrorSeverity::Error,
            VertRsError::Io(_) => ErrorSeverity::Critical,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            VertRsError::Input(InputError::InvalidDate { value, .. }) => {
                format!(
                    "Workout date {:?} is not a valid calendar date (expected YYYY-MM-DD).",
                    value
                )
            }
            VertRsError::Import(ImportError::UnsupportedFormat { format }) => {
                format!(
                    "Files of type '{}' are not supported. Use .json, .toml or .csv.",
                    format
                )
            }
            VertRsError::Import(ImportError::MissingColumn { column }) => {
                format!("The log file has no '{}' column.", column)
            }
            VertRsError::Configuration(reason) => {
                format!("The config file could not be loaded: {}", reason)
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Critical system error requiring immediate attention
    Critical,
    /// Error that prevents operation but system can continue
    Error,
    /// Warning that doesn't prevent operation
    Warning,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Critical | ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_severity() {
        let err = VertRsError::Input(InputError::InvalidDate {
            field: "date".to_string(),
            value: "2024-13-01".to_string(),
        });
        assert_eq!(err.severity(), ErrorSeverity::Warning);

        let err = VertRsError::Io(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.severity().to_tracing_level(), tracing::Level::ERROR);
    }

    #[test]
    fn test_user_messages() {
        let err = VertRsError::Input(InputError::InvalidDate {
            field: "date".to_string(),
            value: "yesterday".to_string(),
        });
        assert!(err.user_message().contains("\"yesterday\""));

        let err = VertRsError::Import(ImportError::UnsupportedFormat {
            format: "xlsx".to_string(),
        });
        assert!(err.user_message().contains("xlsx"));

        let err = VertRsError::Configuration("unknown field `speed`".to_string());
        assert!(err.user_message().contains("unknown field"));
        assert_eq!(err.severity().to_tracing_level(), tracing::Level::ERROR);
    }

    #[test]
    fn test_input_error_converts() {
        let err: VertRsError = InputError::InvalidRange {
            start: "2024-02-01".to_string(),
            end: "2024-01-01".to_string(),
        }
        .into();
        assert!(err.to_string().starts_with("Invalid input"));
    }
}
