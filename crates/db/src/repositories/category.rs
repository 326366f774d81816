//! Category repository.
//!
//! Global categories (`user_id IS NULL`) are visible to every user.

use chrono::Utc;
use pennywise_core::records::{Category, Color, NewCategory};
use pennywise_core::repository::{CategoryRepository as CategoryRepoTrait, RepositoryError};
use pennywise_shared::types::{CategoryId, UserId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use super::{from_db_kind, storage, to_db_kind};
use crate::entities::categories;

/// Category repository implementation.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    /// Creates a new category repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn visible_to(user_id: UserId) -> Condition {
    Condition::any()
        .add(categories::Column::UserId.is_null())
        .add(categories::Column::UserId.eq(user_id.into_inner()))
}

impl CategoryRepoTrait for CategoryRepository {
    async fn find_visible_to_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Category>, RepositoryError> {
        let models = categories::Entity::find()
            .filter(visible_to(user_id))
            .order_by_asc(categories::Column::Name)
            .all(&self.db)
            .await
            .map_err(storage)?;

        Ok(models.into_iter().map(to_domain).collect())
    }

    async fn find_visible_by_id(
        &self,
        user_id: UserId,
        id: CategoryId,
    ) -> Result<Option<Category>, RepositoryError> {
        let model = categories::Entity::find_by_id(id.into_inner())
            .filter(visible_to(user_id))
            .one(&self.db)
            .await
            .map_err(storage)?;

        Ok(model.map(to_domain))
    }

    async fn create(&self, category: NewCategory) -> Result<Category, RepositoryError> {
        let now = Utc::now().into();
        let model = categories::ActiveModel {
            id: Set(CategoryId::new().into_inner()),
            user_id: Set(Some(category.user_id.into_inner())),
            name: Set(category.name),
            category_type: Set(to_db_kind(category.category_type)),
            color: Set(category.color.into()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(storage)?;

        Ok(to_domain(model))
    }

    async fn delete(&self, user_id: UserId, id: CategoryId) -> Result<(), RepositoryError> {
        let result = categories::Entity::delete_many()
            .filter(categories::Column::Id.eq(id.into_inner()))
            .filter(categories::Column::UserId.eq(user_id.into_inner()))
            .exec(&self.db)
            .await
            .map_err(storage)?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound(id.into_inner()));
        }
        Ok(())
    }
}

fn to_domain(model: categories::Model) -> Category {
    Category {
        id: CategoryId::from_uuid(model.id),
        user_id: model.user_id.map(UserId::from_uuid),
        name: model.name,
        category_type: from_db_kind(model.category_type),
        // The column carries a CHECK constraint with the same pattern.
        color: Color::parse(&model.color).unwrap_or_default(),
    }
}
