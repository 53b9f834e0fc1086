//! Error types for event calendar validation.

use thiserror::Error;

/// Errors that can occur while building or checking events.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventDirError {
    /// The event set is configured incorrectly. The message is the full
    /// human-readable report.
    #[error("{0}")]
    Misconfiguration(String),

    /// Active days were requested for an event without a date range.
    /// This is a caller bug, not a data problem.
    #[error("Cannot generate days: event '{0}' does not have start and end dates")]
    Undated(String),

    #[error("Invalid calendar day: month {month}, day {day}")]
    InvalidDate { month: u32, day: u32 },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl EventDirError {
    /// Whether this error describes bad event data rather than misuse of the API.
    pub fn is_misconfiguration(&self) -> bool {
        matches!(self, EventDirError::Misconfiguration(_))
    }
}

/// Result type alias for event validation.
pub type EventDirResult<T> = Result<T, EventDirError>;
