//! Transaction error types.

use pennywise_shared::AppError;
use thiserror::Error;
use uuid::Uuid;

use crate::recurrence::RecurrenceError;
use crate::repository::RepositoryError;

/// Transaction-related errors.
#[derive(Debug, Error)]
pub enum TransactionError {
    /// Input rejected.
    #[error("invalid {field}: {reason}")]
    Validation {
        /// Offending field.
        field: &'static str,
        /// Reason.
        reason: String,
    },

    /// Transaction missing, foreign, or deleted concurrently.
    #[error("Transaction not found: {0}")]
    NotFound(Uuid),

    /// Account missing or foreign.
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// Category missing or foreign.
    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),

    /// Recurrence rule rejected.
    #[error(transparent)]
    InvalidRule(#[from] RecurrenceError),

    /// Repository failure.
    #[error("Transaction storage failed: {0}")]
    Repository(String),
}

impl TransactionError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}

impl From<RepositoryError> for TransactionError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(id) => Self::NotFound(id),
            RepositoryError::InvalidRule(rule) => Self::InvalidRule(rule),
            RepositoryError::Storage(msg) => Self::Repository(msg),
        }
    }
}

impl From<TransactionError> for AppError {
    fn from(err: TransactionError) -> Self {
        match err {
            TransactionError::Validation { field, reason } => Self::validation(field, reason),
            TransactionError::NotFound(_) => Self::NotFound("Transaction not found".to_string()),
            TransactionError::AccountNotFound(_) => {
                Self::validation("account_id", "account not found")
            }
            TransactionError::CategoryNotFound(_) => {
                Self::validation("category_id", "category not found")
            }
            TransactionError::InvalidRule(rule) => {
                let field = match rule {
                    RecurrenceError::UnknownFrequency(_) => "frequency",
                    RecurrenceError::EndBeforeAnchor { .. } => "end_date",
                    RecurrenceError::InvalidWindow { .. } => "start_date",
                };
                Self::validation(field, rule.to_string())
            }
            TransactionError::Repository(msg) => Self::Internal(msg),
        }
    }
}
