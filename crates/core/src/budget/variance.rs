//! Budget variance calculations.
//!
//! Positive variance is always favorable: spending under an expense limit, or
//! earning above an income goal.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::records::TransactionType;

/// Variance status classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarianceStatus {
    /// Under an expense limit, or above an income goal.
    Favorable,
    /// Over an expense limit, or below an income goal.
    Unfavorable,
    /// Exactly on the limit.
    OnBudget,
}

/// Limit vs projected actual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetVariance {
    /// Budget limit.
    pub limit: Decimal,
    /// Projected actual amount.
    pub actual: Decimal,
    /// Signed variance, positive when favorable.
    pub variance: Decimal,
    /// `actual / limit * 100`, two decimals, 0 for a zero limit.
    pub utilization_percent: Decimal,
    /// Classification of `variance`.
    pub status: VarianceStatus,
}

impl BudgetVariance {
    /// Variance for a spending limit: `limit - actual`.
    #[must_use]
    pub fn for_expense(limit: Decimal, actual: Decimal) -> Self {
        Self::build(limit, actual, limit - actual)
    }

    /// Variance for an income goal: `actual - limit`.
    #[must_use]
    pub fn for_income(limit: Decimal, actual: Decimal) -> Self {
        Self::build(limit, actual, actual - limit)
    }

    /// Dispatches on the budget's effective type.
    #[must_use]
    pub fn for_type(budget_type: TransactionType, limit: Decimal, actual: Decimal) -> Self {
        match budget_type {
            TransactionType::Expense => Self::for_expense(limit, actual),
            TransactionType::Income => Self::for_income(limit, actual),
        }
    }

    fn build(limit: Decimal, actual: Decimal, variance: Decimal) -> Self {
        let status = match variance.cmp(&Decimal::ZERO) {
            std::cmp::Ordering::Greater => VarianceStatus::Favorable,
            std::cmp::Ordering::Less => VarianceStatus::Unfavorable,
            std::cmp::Ordering::Equal => VarianceStatus::OnBudget,
        };

        let utilization_percent = if limit.is_zero() {
            Decimal::ZERO
        } else {
            (actual / limit * Decimal::ONE_HUNDRED).round_dp(2)
        };

        Self {
            limit,
            actual,
            variance,
            utilization_percent,
            status,
        }
    }
}
