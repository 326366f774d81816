//! Transaction service: validation and ownership rules for one-off and
//! recurring transactions.

use std::sync::Arc;

use chrono::NaiveDate;
use pennywise_shared::types::{
    AccountId, CategoryId, RecurringTransactionId, TransactionId, UserId,
};
use rust_decimal::Decimal;
use tracing::info;

use super::error::TransactionError;
use crate::records::{RecurringTransaction, Transaction, TransactionType, check_amount};
use crate::recurrence::{Frequency, RecurrenceRule};
use crate::repository::{AccountRepository, CategoryRepository, TransactionRepository};

/// Fields for creating or replacing a transaction.
#[derive(Debug, Clone)]
pub struct TransactionInput {
    /// Account.
    pub account_id: AccountId,
    /// Category.
    pub category_id: CategoryId,
    /// Non-negative magnitude.
    pub amount: Decimal,
    /// Direction.
    pub transaction_type: TransactionType,
    /// Booking date, or the anchor for recurring rules.
    pub date: NaiveDate,
    /// Counterparty.
    pub payee: Option<String>,
    /// Notes.
    pub notes: Option<String>,
}

/// Fields for creating a recurring transaction.
#[derive(Debug, Clone)]
pub struct RecurringInput {
    /// Template values.
    pub transaction: TransactionInput,
    /// `daily`, `weekly`, `monthly` or `yearly`.
    pub frequency: String,
    /// Last possible occurrence.
    pub end_date: Option<NaiveDate>,
}

/// Transaction service.
pub struct TransactionService<T, A, C>
where
    T: TransactionRepository,
    A: AccountRepository,
    C: CategoryRepository,
{
    transactions: Arc<T>,
    accounts: Arc<A>,
    categories: Arc<C>,
}

impl<T, A, C> TransactionService<T, A, C>
where
    T: TransactionRepository,
    A: AccountRepository,
    C: CategoryRepository,
{
    /// Creates a new transaction service.
    #[must_use]
    pub const fn new(transactions: Arc<T>, accounts: Arc<A>, categories: Arc<C>) -> Self {
        Self {
            transactions,
            accounts,
            categories,
        }
    }

    /// One-off transactions dated within `[start, end]`.
    pub async fn list(
        &self,
        user_id: UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>, TransactionError> {
        if start > end {
            return Err(TransactionError::validation(
                "end_date",
                "end_date must not precede start_date",
            ));
        }
        Ok(self
            .transactions
            .find_by_user_and_range(user_id, start, end)
            .await?)
    }

    /// Records a one-off transaction.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for an amount that is negative or does not fit
    /// the amount columns, `AccountNotFound` or
    /// `CategoryNotFound` when either reference is not the user's to use.
    pub async fn create(
        &self,
        user_id: UserId,
        input: TransactionInput,
    ) -> Result<Transaction, TransactionError> {
        let transaction = self.build(user_id, input).await?;
        let saved = self.transactions.save_transaction(transaction).await?;

        info!(user_id = %user_id, transaction_id = ?saved.id, "Transaction created");
        Ok(saved)
    }

    /// Replaces a transaction.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the row is missing, foreign, or was deleted
    /// concurrently, plus the validation errors of [`Self::create`].
    pub async fn update(
        &self,
        user_id: UserId,
        id: TransactionId,
        input: TransactionInput,
    ) -> Result<Transaction, TransactionError> {
        let transaction = self.build(user_id, input).await?.with_id(id);
        let saved = self.transactions.save_transaction(transaction).await?;

        info!(user_id = %user_id, transaction_id = %id, "Transaction updated");
        Ok(saved)
    }

    /// Deletes a transaction.
    pub async fn delete(&self, user_id: UserId, id: TransactionId) -> Result<(), TransactionError> {
        self.transactions.delete_transaction(user_id, id).await?;

        info!(user_id = %user_id, transaction_id = %id, "Transaction deleted");
        Ok(())
    }

    /// Every recurring rule of the user.
    pub async fn list_recurring(
        &self,
        user_id: UserId,
    ) -> Result<Vec<RecurringTransaction>, TransactionError> {
        Ok(self.transactions.find_recurring_by_user(user_id).await?)
    }

    /// Creates a recurring rule.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRule` for an unknown frequency or an end date before
    /// the anchor, plus the validation errors of [`Self::create`].
    pub async fn create_recurring(
        &self,
        user_id: UserId,
        input: RecurringInput,
    ) -> Result<RecurringTransaction, TransactionError> {
        let frequency: Frequency = input.frequency.parse()?;
        let rule = RecurrenceRule {
            frequency,
            end_date: input.end_date,
        };
        let template = self.build(user_id, input.transaction).await?;
        let recurring = RecurringTransaction::new(template, rule)?;
        let saved = self.transactions.save_recurring(recurring).await?;

        info!(
            user_id = %user_id,
            recurring_id = ?saved.id,
            frequency = %frequency,
            "Recurring transaction created"
        );
        Ok(saved)
    }

    /// Deletes a recurring rule.
    pub async fn delete_recurring(
        &self,
        user_id: UserId,
        id: RecurringTransactionId,
    ) -> Result<(), TransactionError> {
        self.transactions.delete_recurring(user_id, id).await?;

        info!(user_id = %user_id, recurring_id = %id, "Recurring transaction deleted");
        Ok(())
    }

    async fn build(
        &self,
        user_id: UserId,
        input: TransactionInput,
    ) -> Result<Transaction, TransactionError> {
        check_amount(input.amount)
            .map_err(|e| TransactionError::validation("amount", e.to_string()))?;

        if self
            .accounts
            .find_by_id(user_id, input.account_id)
            .await?
            .is_none()
        {
            return Err(TransactionError::AccountNotFound(input.account_id.into_inner()));
        }
        if self
            .categories
            .find_visible_by_id(user_id, input.category_id)
            .await?
            .is_none()
        {
            return Err(TransactionError::CategoryNotFound(input.category_id.into_inner()));
        }

        let mut transaction = Transaction::new(
            user_id,
            input.account_id,
            input.category_id,
            input.amount,
            input.transaction_type,
            input.date,
        );
        transaction.payee = input.payee;
        transaction.notes = input.notes;
        Ok(transaction)
    }
}
