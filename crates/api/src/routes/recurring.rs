//! Recurring transaction routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
};
use chrono::NaiveDate;
use pennywise_core::records::{RecurringTransaction, TransactionType};
use pennywise_core::recurrence::Frequency;
use pennywise_core::transaction::RecurringInput;
use pennywise_shared::types::{AccountId, CategoryId, RecurringTransactionId};
use serde::{Deserialize, Serialize};

use super::transactions::TransactionRequest;
use crate::error::ApiResult;
use crate::extract::AppJson;
use crate::{AppState, middleware::AuthUser};

/// Creates the recurring transaction routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/recurring-transactions", get(list_recurring).post(create_recurring))
        .route("/recurring-transactions/{recurring_id}", delete(delete_recurring))
}

/// Request body for a recurring transaction. `date` is the rule anchor.
#[derive(Debug, Deserialize)]
pub struct RecurringRequest {
    /// Template fields.
    #[serde(flatten)]
    pub transaction: TransactionRequest,
    /// `daily`, `weekly`, `monthly` or `yearly`.
    pub frequency: String,
    /// Last possible occurrence.
    pub end_date: Option<NaiveDate>,
}

/// Response for a recurring transaction.
#[derive(Debug, Serialize)]
pub struct RecurringResponse {
    /// Recurring transaction ID.
    pub id: Option<RecurringTransactionId>,
    /// Account.
    pub account_id: AccountId,
    /// Category.
    pub category_id: CategoryId,
    /// Magnitude of each occurrence.
    pub amount: String,
    /// Direction.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Rule anchor.
    pub date: NaiveDate,
    /// Period.
    pub frequency: Frequency,
    /// Last possible occurrence.
    pub end_date: Option<NaiveDate>,
    /// Counterparty.
    pub payee: Option<String>,
    /// Notes.
    pub notes: Option<String>,
}

impl From<RecurringTransaction> for RecurringResponse {
    fn from(r: RecurringTransaction) -> Self {
        Self {
            id: r.id,
            account_id: r.template.account_id,
            category_id: r.template.category_id,
            amount: r.template.amount.to_string(),
            transaction_type: r.template.transaction_type,
            date: r.template.date,
            frequency: r.rule.frequency,
            end_date: r.rule.end_date,
            payee: r.template.payee,
            notes: r.template.notes,
        }
    }
}

/// GET `/recurring-transactions` - List the caller's recurring rules.
async fn list_recurring(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let rules = state.transactions().list_recurring(auth.user_id()).await?;
    let response: Vec<RecurringResponse> = rules.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

/// POST `/recurring-transactions` - Create a recurring rule.
async fn create_recurring(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(payload): AppJson<RecurringRequest>,
) -> ApiResult<impl IntoResponse> {
    let input = RecurringInput {
        transaction: payload.transaction.into(),
        frequency: payload.frequency,
        end_date: payload.end_date,
    };
    let recurring = state
        .transactions()
        .create_recurring(auth.user_id(), input)
        .await?;
    Ok((StatusCode::CREATED, Json(RecurringResponse::from(recurring))))
}

/// DELETE `/recurring-transactions/{recurring_id}` - Delete a recurring rule.
async fn delete_recurring(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(recurring_id): Path<RecurringTransactionId>,
) -> ApiResult<impl IntoResponse> {
    state
        .transactions()
        .delete_recurring(auth.user_id(), recurring_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
