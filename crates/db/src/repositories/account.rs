//! Account repository (read-only).

use pennywise_core::records::Account;
use pennywise_core::repository::{AccountRepository as AccountRepoTrait, RepositoryError};
use pennywise_shared::types::{AccountId, UserId};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use super::storage;
use crate::entities::accounts;

/// Account repository implementation.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl AccountRepoTrait for AccountRepository {
    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Account>, RepositoryError> {
        let models = accounts::Entity::find()
            .filter(accounts::Column::UserId.eq(user_id.into_inner()))
            .order_by_asc(accounts::Column::Name)
            .all(&self.db)
            .await
            .map_err(storage)?;

        Ok(models.into_iter().map(to_domain).collect())
    }

    async fn find_by_id(
        &self,
        user_id: UserId,
        id: AccountId,
    ) -> Result<Option<Account>, RepositoryError> {
        let model = accounts::Entity::find_by_id(id.into_inner())
            .filter(accounts::Column::UserId.eq(user_id.into_inner()))
            .one(&self.db)
            .await
            .map_err(storage)?;

        Ok(model.map(to_domain))
    }
}

fn to_domain(model: accounts::Model) -> Account {
    Account {
        id: AccountId::from_uuid(model.id),
        user_id: UserId::from_uuid(model.user_id),
        name: model.name,
        account_type: model.account_type,
        balance: model.balance,
        currency: model.currency,
        notes: model.notes,
    }
}
