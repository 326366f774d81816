//! Budget data types.

use chrono::NaiveDate;
use pennywise_shared::types::{BudgetId, CategoryId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::BudgetError;
use crate::records::{Category, TransactionType};

/// A spending limit (or income goal) for one category over a date interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Set once persisted.
    pub id: Option<BudgetId>,
    /// Owner.
    pub user_id: UserId,
    /// Budgeted category.
    pub category_id: CategoryId,
    /// Limit, non-negative.
    pub amount: Decimal,
    /// First day covered.
    pub start_date: NaiveDate,
    /// Last day covered, inclusive.
    pub end_date: NaiveDate,
    /// Overrides the category's type when set.
    pub budget_type: Option<TransactionType>,
}

impl Budget {
    /// Creates an unsaved budget.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::Validation` when `end_date < start_date`.
    pub fn new(
        user_id: UserId,
        category_id: CategoryId,
        amount: Decimal,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self, BudgetError> {
        if end_date < start_date {
            return Err(BudgetError::validation(
                "end_date",
                "end_date must not precede start_date",
            ));
        }

        Ok(Self {
            id: None,
            user_id,
            category_id,
            amount,
            start_date,
            end_date,
            budget_type: None,
        })
    }

    /// Sets the persisted id.
    #[must_use]
    pub const fn with_id(mut self, id: BudgetId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the type override.
    #[must_use]
    pub const fn with_budget_type(mut self, budget_type: Option<TransactionType>) -> Self {
        self.budget_type = budget_type;
        self
    }

    /// Override, else the category's type, else expense.
    #[must_use]
    pub fn effective_type(&self, category: Option<&Category>) -> TransactionType {
        self.budget_type
            .or_else(|| category.map(|c| c.category_type))
            .unwrap_or(TransactionType::Expense)
    }
}

/// How a budget request names its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorySelector {
    /// An existing category visible to the user.
    Existing(CategoryId),
    /// Create a user-owned category with this name.
    New {
        /// Category name.
        name: String,
    },
}

/// Fields for creating or replacing a budget.
#[derive(Debug, Clone)]
pub struct BudgetInput {
    /// Existing category, or the name of one to create.
    pub category: CategorySelector,
    /// Limit.
    pub amount: Decimal,
    /// First day covered.
    pub start_date: NaiveDate,
    /// Last day covered.
    pub end_date: NaiveDate,
    /// Type override; also the type of a newly created category.
    pub budget_type: Option<TransactionType>,
    /// Color of a newly created category.
    pub color: Option<String>,
}
