//! Transaction repository for one-off and recurring transactions.

use chrono::{NaiveDate, Utc};
use pennywise_core::records::{RecurringTransaction, Transaction};
use pennywise_core::recurrence::{Frequency, RecurrenceRule};
use pennywise_core::repository::{
    RepositoryError, TransactionRepository as TransactionRepoTrait,
};
use pennywise_shared::types::{
    AccountId, CategoryId, RecurringTransactionId, TransactionId, UserId,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::{from_db_kind, storage, to_db_kind};
use crate::entities::{recurring_transactions, transactions};

/// Transaction repository implementation.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// An update that touched no row means the row vanished underneath us.
fn update_error(id: Uuid) -> impl FnOnce(DbErr) -> RepositoryError {
    move |err| match err {
        DbErr::RecordNotUpdated => RepositoryError::NotFound(id),
        other => storage(other),
    }
}

impl TransactionRepoTrait for TransactionRepository {
    async fn find_by_user_and_range(
        &self,
        user_id: UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>, RepositoryError> {
        let models = transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id.into_inner()))
            .filter(transactions::Column::Date.gte(start))
            .filter(transactions::Column::Date.lte(end))
            .order_by_asc(transactions::Column::Date)
            .order_by_asc(transactions::Column::Id)
            .all(&self.db)
            .await
            .map_err(storage)?;

        Ok(models.into_iter().map(to_domain).collect())
    }

    async fn find_recurring_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<RecurringTransaction>, RepositoryError> {
        let models = recurring_transactions::Entity::find()
            .filter(recurring_transactions::Column::UserId.eq(user_id.into_inner()))
            .order_by_asc(recurring_transactions::Column::Date)
            .order_by_asc(recurring_transactions::Column::Id)
            .all(&self.db)
            .await
            .map_err(storage)?;

        models.into_iter().map(recurring_to_domain).collect()
    }

    async fn save_transaction(
        &self,
        transaction: Transaction,
    ) -> Result<Transaction, RepositoryError> {
        let now = Utc::now().into();

        let model = match transaction.id {
            None => transactions::ActiveModel {
                id: Set(TransactionId::new().into_inner()),
                user_id: Set(transaction.user_id.into_inner()),
                account_id: Set(transaction.account_id.into_inner()),
                category_id: Set(transaction.category_id.into_inner()),
                amount: Set(transaction.amount),
                transaction_type: Set(to_db_kind(transaction.transaction_type)),
                date: Set(transaction.date),
                payee: Set(transaction.payee),
                notes: Set(transaction.notes),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(&self.db)
            .await
            .map_err(storage)?,
            Some(id) => {
                let id = id.into_inner();
                let existing = transactions::Entity::find_by_id(id)
                    .filter(transactions::Column::UserId.eq(transaction.user_id.into_inner()))
                    .one(&self.db)
                    .await
                    .map_err(storage)?
                    .ok_or(RepositoryError::NotFound(id))?;

                let mut active: transactions::ActiveModel = existing.into();
                active.account_id = Set(transaction.account_id.into_inner());
                active.category_id = Set(transaction.category_id.into_inner());
                active.amount = Set(transaction.amount);
                active.transaction_type = Set(to_db_kind(transaction.transaction_type));
                active.date = Set(transaction.date);
                active.payee = Set(transaction.payee);
                active.notes = Set(transaction.notes);
                active.updated_at = Set(now);
                active.update(&self.db).await.map_err(update_error(id))?
            }
        };

        Ok(to_domain(model))
    }

    async fn delete_transaction(
        &self,
        user_id: UserId,
        id: TransactionId,
    ) -> Result<(), RepositoryError> {
        let result = transactions::Entity::delete_many()
            .filter(transactions::Column::Id.eq(id.into_inner()))
            .filter(transactions::Column::UserId.eq(user_id.into_inner()))
            .exec(&self.db)
            .await
            .map_err(storage)?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound(id.into_inner()));
        }
        Ok(())
    }

    async fn save_recurring(
        &self,
        recurring: RecurringTransaction,
    ) -> Result<RecurringTransaction, RepositoryError> {
        let now = Utc::now().into();
        let template = recurring.template;

        let model = match recurring.id {
            None => recurring_transactions::ActiveModel {
                id: Set(RecurringTransactionId::new().into_inner()),
                user_id: Set(template.user_id.into_inner()),
                account_id: Set(template.account_id.into_inner()),
                category_id: Set(template.category_id.into_inner()),
                amount: Set(template.amount),
                transaction_type: Set(to_db_kind(template.transaction_type)),
                date: Set(template.date),
                frequency: Set(recurring.rule.frequency.as_str().to_string()),
                end_date: Set(recurring.rule.end_date),
                payee: Set(template.payee),
                notes: Set(template.notes),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(&self.db)
            .await
            .map_err(storage)?,
            Some(id) => {
                let id = id.into_inner();
                let existing = recurring_transactions::Entity::find_by_id(id)
                    .filter(
                        recurring_transactions::Column::UserId.eq(template.user_id.into_inner()),
                    )
                    .one(&self.db)
                    .await
                    .map_err(storage)?
                    .ok_or(RepositoryError::NotFound(id))?;

                let mut active: recurring_transactions::ActiveModel = existing.into();
                active.account_id = Set(template.account_id.into_inner());
                active.category_id = Set(template.category_id.into_inner());
                active.amount = Set(template.amount);
                active.transaction_type = Set(to_db_kind(template.transaction_type));
                active.date = Set(template.date);
                active.frequency = Set(recurring.rule.frequency.as_str().to_string());
                active.end_date = Set(recurring.rule.end_date);
                active.payee = Set(template.payee);
                active.notes = Set(template.notes);
                active.updated_at = Set(now);
                active.update(&self.db).await.map_err(update_error(id))?
            }
        };

        recurring_to_domain(model)
    }

    async fn delete_recurring(
        &self,
        user_id: UserId,
        id: RecurringTransactionId,
    ) -> Result<(), RepositoryError> {
        let result = recurring_transactions::Entity::delete_many()
            .filter(recurring_transactions::Column::Id.eq(id.into_inner()))
            .filter(recurring_transactions::Column::UserId.eq(user_id.into_inner()))
            .exec(&self.db)
            .await
            .map_err(storage)?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound(id.into_inner()));
        }
        Ok(())
    }
}

fn to_domain(model: transactions::Model) -> Transaction {
    Transaction {
        id: Some(TransactionId::from_uuid(model.id)),
        user_id: UserId::from_uuid(model.user_id),
        account_id: AccountId::from_uuid(model.account_id),
        category_id: CategoryId::from_uuid(model.category_id),
        amount: model.amount,
        transaction_type: from_db_kind(model.transaction_type),
        date: model.date,
        payee: model.payee,
        notes: model.notes,
    }
}

/// Rebuilds a recurring transaction, re-validating the stored rule.
pub(crate) fn recurring_to_domain(
    model: recurring_transactions::Model,
) -> Result<RecurringTransaction, RepositoryError> {
    let frequency: Frequency = model.frequency.parse()?;
    let rule = RecurrenceRule {
        frequency,
        end_date: model.end_date,
    };
    let template = Transaction {
        id: None,
        user_id: UserId::from_uuid(model.user_id),
        account_id: AccountId::from_uuid(model.account_id),
        category_id: CategoryId::from_uuid(model.category_id),
        amount: model.amount,
        transaction_type: from_db_kind(model.transaction_type),
        date: model.date,
        payee: model.payee,
        notes: model.notes,
    };

    let id = RecurringTransactionId::from_uuid(model.id);
    Ok(RecurringTransaction::new(template, rule)?.with_id(id))
}
