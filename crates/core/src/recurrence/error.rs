//! Recurrence error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while building or expanding recurrence rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecurrenceError {
    /// Frequency string is not daily, weekly, monthly or yearly.
    #[error("unknown frequency: {0}")]
    UnknownFrequency(String),

    /// Rule ends before its first occurrence.
    #[error("end date {end} precedes anchor {anchor}")]
    EndBeforeAnchor {
        /// Template date.
        anchor: NaiveDate,
        /// Rule end date.
        end: NaiveDate,
    },

    /// Window start is after window end.
    #[error("window start {start} is after window end {end}")]
    InvalidWindow {
        /// Window start.
        start: NaiveDate,
        /// Window end.
        end: NaiveDate,
    },
}
