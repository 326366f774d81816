//! One-off transaction routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use chrono::NaiveDate;
use pennywise_core::records::{Transaction, TransactionType};
use pennywise_core::transaction::TransactionInput;
use pennywise_shared::types::{AccountId, CategoryId, TransactionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::extract::{AppJson, AppQuery};
use crate::{AppState, middleware::AuthUser};

/// Creates the transaction routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions).post(create_transaction))
        .route(
            "/transactions/{transaction_id}",
            put(update_transaction).delete(delete_transaction),
        )
}

/// Request body for creating or replacing a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionRequest {
    /// Account.
    pub account_id: AccountId,
    /// Category.
    pub category_id: CategoryId,
    /// Non-negative magnitude.
    pub amount: Decimal,
    /// `income` or `expense`.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Booking date.
    pub date: NaiveDate,
    /// Counterparty.
    pub payee: Option<String>,
    /// Notes.
    pub notes: Option<String>,
}

impl From<TransactionRequest> for TransactionInput {
    fn from(r: TransactionRequest) -> Self {
        Self {
            account_id: r.account_id,
            category_id: r.category_id,
            amount: r.amount,
            transaction_type: r.transaction_type,
            date: r.date,
            payee: r.payee,
            notes: r.notes,
        }
    }
}

/// Query parameters for listing transactions.
#[derive(Debug, Deserialize)]
pub struct ListTransactionsQuery {
    /// First day, inclusive.
    pub start_date: NaiveDate,
    /// Last day, inclusive.
    pub end_date: NaiveDate,
}

/// Response for a transaction.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// Transaction ID.
    pub id: Option<TransactionId>,
    /// Account.
    pub account_id: AccountId,
    /// Category.
    pub category_id: CategoryId,
    /// Magnitude.
    pub amount: String,
    /// Direction.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Booking date.
    pub date: NaiveDate,
    /// Counterparty.
    pub payee: Option<String>,
    /// Notes.
    pub notes: Option<String>,
}

impl From<Transaction> for TransactionResponse {
    fn from(t: Transaction) -> Self {
        Self {
            id: t.id,
            account_id: t.account_id,
            category_id: t.category_id,
            amount: t.amount.to_string(),
            transaction_type: t.transaction_type,
            date: t.date,
            payee: t.payee,
            notes: t.notes,
        }
    }
}

/// GET `/transactions` - List transactions booked in a date range.
async fn list_transactions(
    State(state): State<AppState>,
    auth: AuthUser,
    AppQuery(query): AppQuery<ListTransactionsQuery>,
) -> ApiResult<impl IntoResponse> {
    let transactions = state
        .transactions()
        .list(auth.user_id(), query.start_date, query.end_date)
        .await?;
    let response: Vec<TransactionResponse> = transactions.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

/// POST `/transactions` - Record a transaction.
async fn create_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(payload): AppJson<TransactionRequest>,
) -> ApiResult<impl IntoResponse> {
    let transaction = state
        .transactions()
        .create(auth.user_id(), payload.into())
        .await?;
    Ok((StatusCode::CREATED, Json(TransactionResponse::from(transaction))))
}

/// PUT `/transactions/{transaction_id}` - Replace a transaction.
async fn update_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(transaction_id): Path<TransactionId>,
    AppJson(payload): AppJson<TransactionRequest>,
) -> ApiResult<impl IntoResponse> {
    let transaction = state
        .transactions()
        .update(auth.user_id(), transaction_id, payload.into())
        .await?;
    Ok(Json(TransactionResponse::from(transaction)))
}

/// DELETE `/transactions/{transaction_id}` - Delete a transaction.
async fn delete_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(transaction_id): Path<TransactionId>,
) -> ApiResult<impl IntoResponse> {
    state
        .transactions()
        .delete(auth.user_id(), transaction_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
