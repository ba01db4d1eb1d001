//! Boundary errors.
//!
//! The scheduling pipeline itself never fails: defects found while
//! planning are reported as [`Diagnostic`](crate::models::Diagnostic)s.
//! `PlannerError` covers the values a caller hands in before a run.

use thiserror::Error;

/// Errors raised while constructing planner inputs.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Working hours end at or before they start.
    #[error("working hours must end after they start (start {start}, end {end})")]
    InvalidWorkingHours { start: String, end: String },

    /// A time-of-day string is not `HH:MM`.
    #[error("invalid time of day '{value}': expected HH:MM")]
    InvalidTimeOfDay {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Priority name outside `low | medium | high | urgent`.
    #[error("unknown priority '{0}'")]
    InvalidPriority(String),

    /// Estimated duration must be positive.
    #[error("task '{task_id}' has a zero estimated duration")]
    InvalidDuration { task_id: String },

    /// UTC offset outside ±24h.
    #[error("utc offset of {0} minutes is out of range")]
    InvalidUtcOffset(i32),

    /// Planning horizon of zero days or beyond the supported maximum.
    #[error("planning horizon must be between 1 and 3650 days")]
    InvalidHorizon,

    /// Options file could not be parsed.
    #[error("failed to parse scheduling options: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result alias for boundary operations.
pub type Result<T> = std::result::Result<T, PlannerError>;
