//! Error types for the schedule generator.

use thiserror::Error;

/// Errors that can occur while building masks, loading snapshots, or
/// validating a search request.
///
/// An instance with no feasible schedule is not an error; it yields an
/// empty result.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// A time string was malformed, or a start time was not before its end time
    #[error("Invalid time range: {message}")]
    InvalidTimeRange { message: String },

    /// The search was given a zero time limit or a zero solution cap
    #[error("Invalid search budget: {message}")]
    InvalidBudget { message: String },

    /// A strategy name did not match any known search strategy
    #[error("Unknown search strategy: {name}")]
    UnknownStrategy { name: String },

    /// A search config value is out of range
    #[error("Invalid config: {message}")]
    InvalidConfig { message: String },

    /// Snapshot content is well-formed but inconsistent (duplicate CRN, wrong term)
    #[error("Invalid snapshot: {message}")]
    InvalidSnapshot { message: String },

    /// Failed to parse JSON snapshot or config content
    #[error("Parse error: {message}")]
    ParseError { message: String },

    /// Reading a snapshot or config file failed
    #[error("I/O error: {message}")]
    Io { message: String },
}

impl ScheduleError {
    /// Returns true if this error was caused by a malformed caller input
    /// (as opposed to a file that could not be read).
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ScheduleError::InvalidTimeRange { .. }
                | ScheduleError::InvalidBudget { .. }
                | ScheduleError::UnknownStrategy { .. }
                | ScheduleError::InvalidConfig { .. }
                | ScheduleError::InvalidSnapshot { .. }
                | ScheduleError::ParseError { .. }
        )
    }

    pub(crate) fn time_range(message: impl Into<String>) -> Self {
        ScheduleError::InvalidTimeRange {
            message: message.into(),
        }
    }

    pub(crate) fn budget(message: impl Into<String>) -> Self {
        ScheduleError::InvalidBudget {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for ScheduleError {
    fn from(err: serde_json::Error) -> Self {
        ScheduleError::ParseError {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for ScheduleError {
    fn from(err: std::io::Error) -> Self {
        ScheduleError::Io {
            message: err.to_string(),
        }
    }
}
