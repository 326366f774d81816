//! Budget error types.

use pennywise_shared::AppError;
use thiserror::Error;
use uuid::Uuid;

use crate::repository::RepositoryError;

/// Budget-related errors.
#[derive(Debug, Error)]
pub enum BudgetError {
    /// Input rejected.
    #[error("invalid {field}: {reason}")]
    Validation {
        /// Offending field.
        field: &'static str,
        /// Reason.
        reason: String,
    },

    /// Budget missing or owned by someone else.
    #[error("Budget not found: {0}")]
    NotFound(Uuid),

    /// Category missing or owned by someone else.
    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),

    /// Repository failure.
    #[error("Budget storage failed: {0}")]
    Repository(String),
}

impl BudgetError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}

impl From<RepositoryError> for BudgetError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Repository(other.to_string()),
        }
    }
}

impl From<BudgetError> for AppError {
    fn from(err: BudgetError) -> Self {
        match err {
            BudgetError::Validation { field, reason } => Self::validation(field, reason),
            BudgetError::NotFound(_) => Self::NotFound("Budget not found".to_string()),
            BudgetError::CategoryNotFound(_) => {
                Self::validation("category_id", "category not found")
            }
            BudgetError::Repository(msg) => Self::Internal(msg),
        }
    }
}
