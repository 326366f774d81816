//! Budget routes: CRUD, categories, and the forecast.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDate;
use pennywise_core::budget::{Budget, BudgetInput, CategorySelector};
use pennywise_core::forecast::{ForecastFilter, ForecastResult};
use pennywise_core::records::{Category, TransactionType};
use pennywise_shared::AppError;
use pennywise_shared::types::{AccountId, BudgetId, CategoryId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiResult;
use crate::extract::{AppJson, AppQuery};
use crate::{AppState, middleware::AuthUser};

/// Creates the budget routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budgets", get(list_budgets).post(create_budget))
        .route("/budgets/forecast", get(get_forecast))
        .route("/budgets/categories", get(list_categories))
        .route(
            "/budgets/{budget_id}",
            get(get_budget).put(update_budget).delete(delete_budget),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating or replacing a budget.
///
/// Exactly one of `category_id` and `category_name` is needed; a name creates
/// a new category owned by the caller.
#[derive(Debug, Deserialize)]
pub struct BudgetRequest {
    /// Existing category.
    pub category_id: Option<CategoryId>,
    /// Name for a new category.
    pub category_name: Option<String>,
    /// Limit, as a JSON number or string.
    pub amount: Decimal,
    /// First day covered.
    pub start_date: NaiveDate,
    /// Last day covered.
    pub end_date: NaiveDate,
    /// `income` or `expense`.
    #[serde(rename = "type")]
    pub budget_type: Option<TransactionType>,
    /// Color for a new category.
    pub color: Option<String>,
}

impl BudgetRequest {
    fn into_input(self) -> Result<BudgetInput, AppError> {
        let category = match (self.category_id, self.category_name) {
            (Some(id), _) => CategorySelector::Existing(id),
            (None, Some(name)) => CategorySelector::New { name },
            (None, None) => {
                return Err(AppError::validation(
                    "category_id",
                    "category_id or category_name is required",
                ));
            }
        };

        Ok(BudgetInput {
            category,
            amount: self.amount,
            start_date: self.start_date,
            end_date: self.end_date,
            budget_type: self.budget_type,
            color: self.color,
        })
    }
}

/// Query parameters for the forecast.
#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    /// Window start, inclusive.
    pub start_date: NaiveDate,
    /// Window end, inclusive.
    pub end_date: NaiveDate,
    /// Restrict to one account.
    pub account_id: Option<AccountId>,
}

/// Response for a budget.
#[derive(Debug, Serialize)]
pub struct BudgetResponse {
    /// Budget ID.
    pub id: Option<BudgetId>,
    /// Category ID.
    pub category_id: CategoryId,
    /// Limit.
    pub amount: String,
    /// First day covered.
    pub start_date: NaiveDate,
    /// Last day covered.
    pub end_date: NaiveDate,
    /// Type override, if any.
    #[serde(rename = "type")]
    pub budget_type: Option<TransactionType>,
}

impl From<Budget> for BudgetResponse {
    fn from(b: Budget) -> Self {
        Self {
            id: b.id,
            category_id: b.category_id,
            amount: b.amount.to_string(),
            start_date: b.start_date,
            end_date: b.end_date,
            budget_type: b.budget_type,
        }
    }
}

/// Response for a category.
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    /// Category ID.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Default direction.
    #[serde(rename = "type")]
    pub category_type: TransactionType,
    /// Display color.
    pub color: String,
    /// Shared by every user.
    pub is_global: bool,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        Self {
            is_global: c.user_id.is_none(),
            id: c.id,
            name: c.name,
            category_type: c.category_type,
            color: c.color.as_str().to_string(),
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/budgets` - List the caller's budgets, newest period first.
async fn list_budgets(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let budgets = state.budgets().list(auth.user_id()).await?;
    let response: Vec<BudgetResponse> = budgets.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

/// GET `/budgets/{budget_id}` - Get one budget.
async fn get_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(budget_id): Path<BudgetId>,
) -> ApiResult<impl IntoResponse> {
    let budget = state.budgets().get(auth.user_id(), budget_id).await?;
    Ok(Json(BudgetResponse::from(budget)))
}

/// POST `/budgets` - Create a budget, creating its category when named.
async fn create_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(payload): AppJson<BudgetRequest>,
) -> ApiResult<impl IntoResponse> {
    let budget = state
        .budgets()
        .create(auth.user_id(), payload.into_input()?)
        .await?;
    Ok((StatusCode::CREATED, Json(BudgetResponse::from(budget))))
}

/// PUT `/budgets/{budget_id}` - Replace a budget.
async fn update_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(budget_id): Path<BudgetId>,
    AppJson(payload): AppJson<BudgetRequest>,
) -> ApiResult<impl IntoResponse> {
    let budget = state
        .budgets()
        .update(auth.user_id(), budget_id, payload.into_input()?)
        .await?;
    Ok(Json(BudgetResponse::from(budget)))
}

/// DELETE `/budgets/{budget_id}` - Delete a budget.
async fn delete_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(budget_id): Path<BudgetId>,
) -> ApiResult<impl IntoResponse> {
    state.budgets().delete(auth.user_id(), budget_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET `/budgets/categories` - Categories the caller can budget against.
async fn list_categories(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let categories = state.budgets().categories(auth.user_id()).await?;
    let response: Vec<CategoryResponse> = categories.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

/// GET `/budgets/forecast` - Projected actuals and variance per budget.
async fn get_forecast(
    State(state): State<AppState>,
    auth: AuthUser,
    AppQuery(query): AppQuery<ForecastQuery>,
) -> ApiResult<Json<ForecastResult>> {
    debug!(
        user_id = %auth.user_id(),
        start = %query.start_date,
        end = %query.end_date,
        "Forecast requested"
    );

    let filter = ForecastFilter {
        account_id: query.account_id,
    };
    let result = state
        .forecasts()
        .forecast_with_filter(auth.user_id(), query.start_date, query.end_date, filter)
        .await?;
    Ok(Json(result))
}
