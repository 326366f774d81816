//! Forecast data types.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use pennywise_shared::types::{AccountId, BudgetId, CategoryId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ForecastError;
use crate::budget::VarianceStatus;
use crate::records::TransactionType;

/// Inclusive `[start, end]` date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    /// Creates a window.
    ///
    /// # Errors
    ///
    /// Returns `ForecastError::InvalidRange` when `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ForecastError> {
        if start > end {
            return Err(ForecastError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// First day.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days covered, counting both ends.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Whether `date` falls inside the window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Overlap with `[start, end]`, if any.
    #[must_use]
    pub fn intersect(&self, start: NaiveDate, end: NaiveDate) -> Option<Self> {
        let start = self.start.max(start);
        let end = self.end.min(end);
        (start <= end).then_some(Self { start, end })
    }
}

/// Optional narrowing of a forecast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastFilter {
    /// Only count occurrences on this account.
    pub account_id: Option<AccountId>,
}

/// Projection for one budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetForecast {
    /// Budget ID.
    pub budget_id: BudgetId,
    /// Budgeted category.
    pub category_id: CategoryId,
    /// Effective type.
    pub budget_type: TransactionType,
    /// Budget limit.
    pub limit: Decimal,
    /// Start of the budget interval clipped to the window.
    pub period_start: NaiveDate,
    /// End of the budget interval clipped to the window.
    pub period_end: NaiveDate,
    /// Sum of matching occurrences in the period.
    pub projected_actual: Decimal,
    /// Positive when favorable.
    pub variance: Decimal,
    /// `projected_actual / limit * 100`.
    pub utilization_percent: Decimal,
    /// Classification of `variance`.
    pub status: VarianceStatus,
}

/// Activity in a (category, type) pair that no budget covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Category.
    pub category_id: CategoryId,
    /// Direction.
    pub transaction_type: TransactionType,
    /// Sum of occurrence amounts.
    pub total: Decimal,
    /// Number of occurrences.
    pub occurrences: usize,
}

/// Projected movement on one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountProjection {
    /// Account.
    pub account_id: AccountId,
    /// Display name.
    pub name: String,
    /// Balance today.
    pub current_balance: Decimal,
    /// Income occurrences in the window.
    pub projected_income: Decimal,
    /// Expense occurrences in the window.
    pub projected_expense: Decimal,
    /// `projected_income - projected_expense`.
    pub net_change: Decimal,
    /// `current_balance + net_change`.
    pub projected_balance: Decimal,
}

/// Full forecast over a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Window start.
    pub window_start: NaiveDate,
    /// Window end.
    pub window_end: NaiveDate,
    /// Per-budget projections.
    pub budgets: BTreeMap<BudgetId, BudgetForecast>,
    /// Activity outside every budget, sorted by category then type.
    pub unbudgeted: Vec<CategoryTotal>,
    /// Per-account projections, sorted by account id.
    pub accounts: Vec<AccountProjection>,
}
