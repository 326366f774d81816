//! Forecast error types.

use chrono::NaiveDate;
use pennywise_shared::AppError;
use thiserror::Error;

use crate::recurrence::RecurrenceError;
use crate::repository::RepositoryError;

/// Forecast errors.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Window start is after window end.
    #[error("start date {start} is after end date {end}")]
    InvalidRange {
        /// Window start.
        start: NaiveDate,
        /// Window end.
        end: NaiveDate,
    },

    /// Window is longer than the configured maximum.
    #[error("forecast window of {days} days exceeds the maximum of {max} days")]
    WindowTooLarge {
        /// Requested length, inclusive.
        days: i64,
        /// Configured maximum.
        max: u32,
    },

    /// A stored recurring rule is malformed.
    #[error("invalid recurring rule: {0}")]
    InvalidRule(#[from] RecurrenceError),

    /// A repository could not be read. No partial result is returned.
    #[error("forecast data unavailable: {0}")]
    Unavailable(String),
}

impl From<RepositoryError> for ForecastError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::InvalidRule(rule) => Self::InvalidRule(rule),
            other => Self::Unavailable(other.to_string()),
        }
    }
}

impl From<ForecastError> for AppError {
    fn from(err: ForecastError) -> Self {
        match err {
            ForecastError::InvalidRange { .. } => Self::validation("end_date", err.to_string()),
            ForecastError::WindowTooLarge { .. } => Self::validation("end_date", err.to_string()),
            ForecastError::InvalidRule(_) => Self::Internal(err.to_string()),
            ForecastError::Unavailable(_) => Self::Unavailable(err.to_string()),
        }
    }
}
