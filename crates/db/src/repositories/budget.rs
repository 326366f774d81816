//! Budget repository for budget database operations.

use chrono::{NaiveDate, Utc};
use pennywise_core::budget::Budget;
use pennywise_core::repository::{BudgetRepository as BudgetRepoTrait, RepositoryError};
use pennywise_shared::types::{BudgetId, CategoryId, UserId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use super::{from_db_kind, storage, to_db_kind};
use crate::entities::budgets;

/// Budget repository implementation.
#[derive(Debug, Clone)]
pub struct BudgetRepository {
    db: DatabaseConnection,
}

impl BudgetRepository {
    /// Creates a new budget repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl BudgetRepoTrait for BudgetRepository {
    async fn find_by_user_and_range(
        &self,
        user_id: UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Budget>, RepositoryError> {
        // Interval intersection: budget starts before the window ends and ends after it starts.
        let models = budgets::Entity::find()
            .filter(budgets::Column::UserId.eq(user_id.into_inner()))
            .filter(budgets::Column::StartDate.lte(end))
            .filter(budgets::Column::EndDate.gte(start))
            .order_by_asc(budgets::Column::StartDate)
            .order_by_asc(budgets::Column::Id)
            .all(&self.db)
            .await
            .map_err(storage)?;

        Ok(models.into_iter().map(to_domain).collect())
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Budget>, RepositoryError> {
        let models = budgets::Entity::find()
            .filter(budgets::Column::UserId.eq(user_id.into_inner()))
            .order_by_desc(budgets::Column::StartDate)
            .order_by_asc(budgets::Column::Id)
            .all(&self.db)
            .await
            .map_err(storage)?;

        Ok(models.into_iter().map(to_domain).collect())
    }

    async fn find_by_id(
        &self,
        user_id: UserId,
        id: BudgetId,
    ) -> Result<Option<Budget>, RepositoryError> {
        let model = budgets::Entity::find_by_id(id.into_inner())
            .filter(budgets::Column::UserId.eq(user_id.into_inner()))
            .one(&self.db)
            .await
            .map_err(storage)?;

        Ok(model.map(to_domain))
    }

    async fn save(&self, budget: Budget) -> Result<Budget, RepositoryError> {
        let now = Utc::now().into();

        let model = match budget.id {
            None => budgets::ActiveModel {
                id: Set(BudgetId::new().into_inner()),
                user_id: Set(budget.user_id.into_inner()),
                category_id: Set(budget.category_id.into_inner()),
                amount: Set(budget.amount),
                start_date: Set(budget.start_date),
                end_date: Set(budget.end_date),
                budget_type: Set(budget.budget_type.map(to_db_kind)),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(&self.db)
            .await
            .map_err(storage)?,
            Some(id) => {
                let id = id.into_inner();
                let existing = budgets::Entity::find_by_id(id)
                    .filter(budgets::Column::UserId.eq(budget.user_id.into_inner()))
                    .one(&self.db)
                    .await
                    .map_err(storage)?
                    .ok_or(RepositoryError::NotFound(id))?;

                let mut active: budgets::ActiveModel = existing.into();
                active.category_id = Set(budget.category_id.into_inner());
                active.amount = Set(budget.amount);
                active.start_date = Set(budget.start_date);
                active.end_date = Set(budget.end_date);
                active.budget_type = Set(budget.budget_type.map(to_db_kind));
                active.updated_at = Set(now);
                active.update(&self.db).await.map_err(|e| match e {
                    DbErr::RecordNotUpdated => RepositoryError::NotFound(id),
                    other => storage(other),
                })?
            }
        };

        Ok(to_domain(model))
    }

    async fn delete(&self, user_id: UserId, id: BudgetId) -> Result<(), RepositoryError> {
        let result = budgets::Entity::delete_many()
            .filter(budgets::Column::Id.eq(id.into_inner()))
            .filter(budgets::Column::UserId.eq(user_id.into_inner()))
            .exec(&self.db)
            .await
            .map_err(storage)?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound(id.into_inner()));
        }
        Ok(())
    }
}

fn to_domain(model: budgets::Model) -> Budget {
    Budget {
        id: Some(BudgetId::from_uuid(model.id)),
        user_id: UserId::from_uuid(model.user_id),
        category_id: CategoryId::from_uuid(model.category_id),
        amount: model.amount,
        start_date: model.start_date,
        end_date: model.end_date,
        budget_type: model.budget_type.map(from_db_kind),
    }
}
