//! JSON error responses.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pennywise_core::budget::BudgetError;
use pennywise_core::forecast::ForecastError;
use pennywise_core::transaction::TransactionError;
use pennywise_shared::AppError;
use serde_json::json;
use tracing::error;

/// Handler error rendered as `{"error": code, "message": text}`.
///
/// Service errors and extractor rejections convert with `?`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<BudgetError> for ApiError {
    fn from(err: BudgetError) -> Self {
        Self(err.into())
    }
}

impl From<TransactionError> for ApiError {
    fn from(err: TransactionError) -> Self {
        Self(err.into())
    }
}

impl From<ForecastError> for ApiError {
    fn from(err: ForecastError) -> Self {
        Self(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(rejection_error(&rejection.body_text(), "body"))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(rejection_error(&rejection.body_text(), "query"))
    }
}

/// Shorthand for handler results.
pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error_response(&self.0)
    }
}

/// Renders an [`AppError`] as an HTTP response.
pub fn error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    // Internal details stay in the log.
    let message = match err {
        AppError::Internal(detail) => {
            error!(error = %detail, "Internal error");
            "An internal error occurred".to_string()
        }
        AppError::Unavailable(detail) => {
            error!(error = %detail, "Dependency unavailable");
            "Service temporarily unavailable".to_string()
        }
        AppError::Validation { reason, .. } => reason.clone(),
        AppError::Unauthorized(msg) | AppError::NotFound(msg) | AppError::Conflict(msg) => {
            msg.clone()
        }
    };

    let body = match err.field() {
        Some(field) => json!({
            "error": err.error_code(),
            "message": message,
            "field": field,
        }),
        None => json!({
            "error": err.error_code(),
            "message": message,
        }),
    };

    (status, Json(body)).into_response()
}

/// Turns an extractor rejection into a validation error on the offending
/// field, or on `fallback` when the message names none.
fn rejection_error(text: &str, fallback: &'static str) -> AppError {
    match rejected_field(text) {
        Some(field) => AppError::validation(field, text),
        None => AppError::validation(fallback, text),
    }
}

/// Field named by a deserialization message.
///
/// Handles serde's "missing field `x`" and the "x: reason" prefix that
/// axum puts before per-field errors.
fn rejected_field(text: &str) -> Option<String> {
    if let Some(rest) = text.split("missing field `").nth(1) {
        return rest.split('`').next().map(str::to_string);
    }

    let (_, detail) = text.split_once(": ")?;
    let (path, _) = detail.split_once(": ")?;
    let is_path = !path.is_empty()
        && path
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '[' | ']'));
    is_path.then(|| path.to_string())
}
