//! Storage-agnostic repository traits.
//!
//! These traits are implemented by the db crate. Every method is scoped to a
//! single user; a record owned by someone else is reported exactly like a
//! missing one.

use std::future::Future;

use chrono::NaiveDate;
use pennywise_shared::types::{
    AccountId, BudgetId, CategoryId, RecurringTransactionId, TransactionId, UserId,
};
use thiserror::Error;
use uuid::Uuid;

use crate::budget::Budget;
use crate::records::{Account, Category, NewCategory, RecurringTransaction, Transaction};
use crate::recurrence::RecurrenceError;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No row with this id for this user.
    #[error("record not found: {0}")]
    NotFound(Uuid),

    /// A stored recurrence rule could not be rebuilt.
    #[error("invalid stored rule: {0}")]
    InvalidRule(#[from] RecurrenceError),

    /// The backing store failed.
    #[error("storage error: {0}")]
    Storage(String),
}

/// One-off and recurring transaction persistence.
pub trait TransactionRepository: Send + Sync {
    /// One-off transactions dated within `[start, end]`.
    fn find_by_user_and_range(
        &self,
        user_id: UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Future<Output = Result<Vec<Transaction>, RepositoryError>> + Send;

    /// Every recurring rule of the user.
    fn find_recurring_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<RecurringTransaction>, RepositoryError>> + Send;

    /// Inserts when `id` is `None`, otherwise updates the user's row.
    fn save_transaction(
        &self,
        transaction: Transaction,
    ) -> impl Future<Output = Result<Transaction, RepositoryError>> + Send;

    /// Deletes the user's transaction.
    fn delete_transaction(
        &self,
        user_id: UserId,
        id: TransactionId,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Inserts when `id` is `None`, otherwise updates the user's row.
    fn save_recurring(
        &self,
        recurring: RecurringTransaction,
    ) -> impl Future<Output = Result<RecurringTransaction, RepositoryError>> + Send;

    /// Deletes the user's recurring rule.
    fn delete_recurring(
        &self,
        user_id: UserId,
        id: RecurringTransactionId,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}

/// Budget persistence.
pub trait BudgetRepository: Send + Sync {
    /// Budgets whose interval intersects `[start, end]`.
    fn find_by_user_and_range(
        &self,
        user_id: UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Future<Output = Result<Vec<Budget>, RepositoryError>> + Send;

    /// All budgets of the user, newest start date first.
    fn list_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<Budget>, RepositoryError>> + Send;

    /// Fetches one budget.
    fn find_by_id(
        &self,
        user_id: UserId,
        id: BudgetId,
    ) -> impl Future<Output = Result<Option<Budget>, RepositoryError>> + Send;

    /// Inserts when `id` is `None`, otherwise updates the user's row.
    fn save(&self, budget: Budget) -> impl Future<Output = Result<Budget, RepositoryError>> + Send;

    /// Deletes the user's budget.
    fn delete(
        &self,
        user_id: UserId,
        id: BudgetId,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}

/// Category lookup, creation, and removal.
pub trait CategoryRepository: Send + Sync {
    /// Global categories plus the user's own.
    fn find_visible_to_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<Category>, RepositoryError>> + Send;

    /// One category, if global or owned by the user.
    fn find_visible_by_id(
        &self,
        user_id: UserId,
        id: CategoryId,
    ) -> impl Future<Output = Result<Option<Category>, RepositoryError>> + Send;

    /// Creates a user-owned category.
    fn create(
        &self,
        category: NewCategory,
    ) -> impl Future<Output = Result<Category, RepositoryError>> + Send;

    /// Deletes a category owned by the user. Global categories are never
    /// matched.
    fn delete(
        &self,
        user_id: UserId,
        id: CategoryId,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}

/// Read access to accounts.
pub trait AccountRepository: Send + Sync {
    /// All accounts of the user.
    fn find_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<Account>, RepositoryError>> + Send;

    /// One account of the user.
    fn find_by_id(
        &self,
        user_id: UserId,
        id: AccountId,
    ) -> impl Future<Output = Result<Option<Account>, RepositoryError>> + Send;
}
