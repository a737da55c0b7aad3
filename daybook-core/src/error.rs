//! Error types for daybook.

use thiserror::Error;

/// Errors that can occur in daybook operations.
#[derive(Error, Debug)]
pub enum DaybookError {
    #[error("Invalid format '{input}': {reason}")]
    Format { input: String, reason: String },

    #[error("Line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<DaybookError>,
    },

    #[error("Start time {start} is after end time {end}")]
    InvalidRange { start: String, end: String },

    #[error("Event {start} - {end} conflicts with an existing event on {date}")]
    Conflict {
        date: String,
        start: String,
        end: String,
    },

    #[error("Day {day} does not exist in a month of {days_in_month} days")]
    InvalidDay { day: u32, days_in_month: u32 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DaybookError {
    pub(crate) fn format(input: &str, reason: impl Into<String>) -> Self {
        DaybookError::Format {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// True when the error is a missing file rather than a bad one.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DaybookError::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Result type alias for daybook operations.
pub type DaybookResult<T> = Result<T, DaybookError>;
