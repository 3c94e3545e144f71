//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while parsing records, computing
//! payroll, or talking to the record store.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// Variants fall into three families:
/// - parse failures ([`EngineError::InvalidTime`], [`EngineError::InvalidDate`]),
///   which the monthly aggregation recovers from per record;
/// - configuration errors, which abort the requested computation;
/// - collaborator failures from storage or CSV I/O.
///
/// # Example
///
/// ```
/// use kr_payroll::error::EngineError;
///
/// let error = EngineError::InvalidTime {
///     value: "25:00".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid time of day: '25:00'");
/// assert!(error.is_parse_failure());
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A time-of-day string was not a valid `HH:MM` value.
    #[error("Invalid time of day: '{value}'")]
    InvalidTime {
        /// The text that failed to parse.
        value: String,
    },

    /// A calendar date string was not a valid `YYYY-MM-DD` value.
    #[error("Invalid date: '{value}'")]
    InvalidDate {
        /// The text that failed to parse.
        value: String,
    },

    /// The requested year/month is outside the valid calendar range.
    #[error("Invalid payroll period: {year}-{month}")]
    InvalidPeriod {
        /// The requested year.
        year: i32,
        /// The requested month.
        month: u32,
    },

    /// A configuration value was rejected.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfiguration {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No record is stored for the requested date.
    #[error("No work record for {date}")]
    RecordNotFound {
        /// The requested date.
        date: String,
    },

    /// The record store failed.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },

    /// Writing or reading the CSV dump failed.
    #[error("Export error: {message}")]
    Export {
        /// A description of the export failure.
        message: String,
    },
}

impl EngineError {
    /// Returns `true` for malformed time or date input.
    pub fn is_parse_failure(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidTime { .. } | EngineError::InvalidDate { .. }
        )
    }

    /// Returns `true` for errors that abort a computation because its inputs
    /// or configuration are unusable.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidPeriod { .. }
                | EngineError::InvalidConfiguration { .. }
                | EngineError::ConfigNotFound { .. }
                | EngineError::ConfigParseError { .. }
        )
    }
}

impl From<rusqlite::Error> for EngineError {
    fn from(error: rusqlite::Error) -> Self {
        EngineError::Storage {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for EngineError {
    fn from(error: csv::Error) -> Self {
        EngineError::Export {
            message: error.to_string(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
