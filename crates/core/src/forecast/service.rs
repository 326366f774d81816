//! Forecast service: fetches a user's data and aggregates it.

use std::sync::Arc;

use chrono::NaiveDate;
use pennywise_shared::types::UserId;
use tracing::{debug, warn};

use super::aggregate::{ForecastInputs, aggregate};
use super::error::ForecastError;
use super::types::{DateWindow, ForecastFilter, ForecastResult};
use crate::repository::{
    AccountRepository, BudgetRepository, CategoryRepository, TransactionRepository,
};

/// Default cap on the window length, in days.
pub const DEFAULT_MAX_WINDOW_DAYS: u32 = 3660;

/// Forecasts category and account activity over a window.
///
/// Stateless between calls; every call reads fresh data.
pub struct ForecastService<T, B, C, A>
where
    T: TransactionRepository,
    B: BudgetRepository,
    C: CategoryRepository,
    A: AccountRepository,
{
    transactions: Arc<T>,
    budgets: Arc<B>,
    categories: Arc<C>,
    accounts: Arc<A>,
    max_window_days: u32,
}

impl<T, B, C, A> ForecastService<T, B, C, A>
where
    T: TransactionRepository,
    B: BudgetRepository,
    C: CategoryRepository,
    A: AccountRepository,
{
    /// Creates a forecast service with the default window cap.
    #[must_use]
    pub const fn new(
        transactions: Arc<T>,
        budgets: Arc<B>,
        categories: Arc<C>,
        accounts: Arc<A>,
    ) -> Self {
        Self {
            transactions,
            budgets,
            categories,
            accounts,
            max_window_days: DEFAULT_MAX_WINDOW_DAYS,
        }
    }

    /// Overrides the window cap.
    #[must_use]
    pub const fn with_max_window_days(mut self, max_window_days: u32) -> Self {
        self.max_window_days = max_window_days;
        self
    }

    /// Forecasts every account of the user over `[start, end]`.
    pub async fn forecast(
        &self,
        user_id: UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ForecastResult, ForecastError> {
        self.forecast_with_filter(user_id, start, end, ForecastFilter::default())
            .await
    }

    /// Forecasts over `[start, end]`, optionally restricted to one account.
    ///
    /// # Errors
    ///
    /// - `InvalidRange` / `WindowTooLarge` before anything is fetched
    /// - `Unavailable` when any repository fails
    /// - `InvalidRule` for a stored rule that cannot be expanded
    pub async fn forecast_with_filter(
        &self,
        user_id: UserId,
        start: NaiveDate,
        end: NaiveDate,
        filter: ForecastFilter,
    ) -> Result<ForecastResult, ForecastError> {
        let window = DateWindow::new(start, end)?;
        if window.days() > i64::from(self.max_window_days) {
            return Err(ForecastError::WindowTooLarge {
                days: window.days(),
                max: self.max_window_days,
            });
        }

        let (transactions, recurring, budgets, categories, accounts) = tokio::try_join!(
            self.transactions.find_by_user_and_range(user_id, start, end),
            self.transactions.find_recurring_by_user(user_id),
            self.budgets.find_by_user_and_range(user_id, start, end),
            self.categories.find_visible_to_user(user_id),
            self.accounts.find_by_user(user_id),
        )
        .map_err(|e| {
            warn!(user_id = %user_id, error = %e, "Forecast fetch failed");
            ForecastError::from(e)
        })?;

        debug!(
            user_id = %user_id,
            %start,
            %end,
            transactions = transactions.len(),
            recurring = recurring.len(),
            budgets = budgets.len(),
            "Aggregating forecast"
        );

        let inputs = ForecastInputs {
            transactions,
            recurring,
            budgets,
            categories,
            accounts,
        };
        aggregate(window, &inputs, &filter)
    }
}
