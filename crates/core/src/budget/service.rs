//! Budget service: category resolution and budget CRUD rules.

use std::sync::Arc;

use pennywise_shared::types::{BudgetId, UserId};
use tracing::{info, warn};

use super::error::BudgetError;
use super::types::{Budget, BudgetInput, CategorySelector};
use crate::records::category::MAX_CATEGORY_NAME_LENGTH;
use crate::records::{Category, Color, NewCategory, TransactionType, check_amount};
use crate::repository::{BudgetRepository, CategoryRepository};

/// Budget service for business logic.
pub struct BudgetService<B: BudgetRepository, C: CategoryRepository> {
    budgets: Arc<B>,
    categories: Arc<C>,
}

impl<B: BudgetRepository, C: CategoryRepository> BudgetService<B, C> {
    /// Creates a new budget service.
    #[must_use]
    pub const fn new(budgets: Arc<B>, categories: Arc<C>) -> Self {
        Self {
            budgets,
            categories,
        }
    }

    /// Resolves the category a budget request refers to.
    ///
    /// An existing category must be global or owned by the user. A new one is
    /// created for the user, defaulting to an expense category with the
    /// default color.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::CategoryNotFound` for an unknown or foreign id and
    /// `BudgetError::Validation` for a bad name or color.
    pub async fn resolve_category(
        &self,
        user_id: UserId,
        selector: CategorySelector,
        category_type: Option<TransactionType>,
        color: Option<&str>,
    ) -> Result<Category, BudgetError> {
        match selector {
            CategorySelector::Existing(id) => self
                .categories
                .find_visible_by_id(user_id, id)
                .await?
                .ok_or_else(|| BudgetError::CategoryNotFound(id.into_inner())),
            CategorySelector::New { name } => {
                let name = name.trim().to_string();
                if name.is_empty() {
                    return Err(BudgetError::validation(
                        "category_name",
                        "category_name must not be empty",
                    ));
                }
                if name.chars().count() > MAX_CATEGORY_NAME_LENGTH {
                    return Err(BudgetError::validation(
                        "category_name",
                        format!(
                            "category_name must be at most {MAX_CATEGORY_NAME_LENGTH} characters"
                        ),
                    ));
                }
                let color = match color {
                    Some(raw) => Color::parse(raw)
                        .map_err(|e| BudgetError::validation("color", e.to_string()))?,
                    None => Color::default(),
                };

                let category = self
                    .categories
                    .create(NewCategory {
                        user_id,
                        name,
                        category_type: category_type.unwrap_or(TransactionType::Expense),
                        color,
                    })
                    .await?;

                info!(
                    user_id = %user_id,
                    category_id = %category.id,
                    name = %category.name,
                    "Created category for budget"
                );
                Ok(category)
            }
        }
    }

    /// Creates a budget for the user, creating its category when named.
    ///
    /// A category created here is removed again if the budget cannot be
    /// stored.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::Validation` for an inverted interval or an
    /// amount that is negative or does not fit the amount columns, and
    /// `BudgetError::CategoryNotFound` for a category the user cannot see.
    pub async fn create(&self, user_id: UserId, input: BudgetInput) -> Result<Budget, BudgetError> {
        let saved = self.place(user_id, None, input).await?;

        info!(user_id = %user_id, budget_id = ?saved.id, "Budget created");
        Ok(saved)
    }

    /// Replaces every field of an existing budget.
    ///
    /// The budget must exist before a named category is created.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NotFound` when the budget is missing or foreign,
    /// plus the validation errors of [`Self::create`].
    pub async fn update(
        &self,
        user_id: UserId,
        id: BudgetId,
        input: BudgetInput,
    ) -> Result<Budget, BudgetError> {
        let saved = self.place(user_id, Some(id), input).await?;

        info!(user_id = %user_id, budget_id = %id, "Budget updated");
        Ok(saved)
    }

    /// Deletes a budget. Deleting twice fails the second time.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NotFound` when the budget is missing or foreign.
    pub async fn delete(&self, user_id: UserId, id: BudgetId) -> Result<(), BudgetError> {
        self.budgets.delete(user_id, id).await?;

        info!(user_id = %user_id, budget_id = %id, "Budget deleted");
        Ok(())
    }

    /// Fetches one budget.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NotFound` when the budget is missing or foreign.
    pub async fn get(&self, user_id: UserId, id: BudgetId) -> Result<Budget, BudgetError> {
        self.budgets
            .find_by_id(user_id, id)
            .await?
            .ok_or_else(|| BudgetError::NotFound(id.into_inner()))
    }

    /// Lists the user's budgets.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<Budget>, BudgetError> {
        Ok(self.budgets.list_by_user(user_id).await?)
    }

    /// Lists the categories the user may budget against.
    pub async fn categories(&self, user_id: UserId) -> Result<Vec<Category>, BudgetError> {
        Ok(self.categories.find_visible_to_user(user_id).await?)
    }

    async fn place(
        &self,
        user_id: UserId,
        id: Option<BudgetId>,
        input: BudgetInput,
    ) -> Result<Budget, BudgetError> {
        check_amount(input.amount).map_err(|e| BudgetError::validation("amount", e.to_string()))?;
        if input.end_date < input.start_date {
            return Err(BudgetError::validation(
                "end_date",
                "end_date must not precede start_date",
            ));
        }
        if let Some(id) = id {
            self.get(user_id, id).await?;
        }

        let created = matches!(input.category, CategorySelector::New { .. });
        let category = self
            .resolve_category(
                user_id,
                input.category,
                input.budget_type,
                input.color.as_deref(),
            )
            .await?;

        let mut budget = Budget::new(
            user_id,
            category.id,
            input.amount,
            input.start_date,
            input.end_date,
        )?
        .with_budget_type(input.budget_type);
        if let Some(id) = id {
            budget = budget.with_id(id);
        }

        match self.budgets.save(budget).await {
            Ok(saved) => Ok(saved),
            Err(err) => {
                if created {
                    self.discard_category(user_id, &category).await;
                }
                Err(err.into())
            }
        }
    }

    /// Removes a category created for a budget that was never stored.
    async fn discard_category(&self, user_id: UserId, category: &Category) {
        match self.categories.delete(user_id, category.id).await {
            Ok(()) => info!(
                user_id = %user_id,
                category_id = %category.id,
                "Removed category of unsaved budget"
            ),
            Err(e) => warn!(
                user_id = %user_id,
                category_id = %category.id,
                error = %e,
                "Failed to remove category of unsaved budget"
            ),
        }
    }
}
