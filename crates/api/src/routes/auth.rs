//! Authentication routes for registration and login.

use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post,
};
use pennywise_core::auth::{
    PasswordError, hash_password, validate_password, verify_password,
};
use pennywise_db::{UserRepository, is_unique_violation};
use pennywise_shared::auth::{LoginRequest, RegisterRequest, TokenResponse};
use pennywise_shared::{AppError, JwtError};
use sea_orm::DbErr;
use tracing::info;
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiResult;
use crate::extract::AppJson;

const EMAIL_TAKEN: &str = "Email is already registered";

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
}

fn password_error(e: PasswordError) -> AppError {
    match e {
        PasswordError::TooShort => AppError::validation("password", e.to_string()),
        other => AppError::Internal(other.to_string()),
    }
}

/// A concurrent registration can pass the `email_exists` check and still
/// lose on the unique index.
pub(crate) fn create_user_error(e: DbErr) -> AppError {
    if is_unique_violation(&e) {
        AppError::Conflict(EMAIL_TAKEN.to_string())
    } else {
        AppError::Internal(e.to_string())
    }
}

fn token_error(e: JwtError) -> AppError {
    AppError::Internal(e.to_string())
}

fn issue_token(state: &AppState, user_id: Uuid) -> Result<TokenResponse, AppError> {
    let token = state
        .jwt_service
        .generate_access_token(user_id)
        .map_err(token_error)?;
    Ok(TokenResponse::bearer(
        user_id,
        token,
        state.jwt_service.access_token_expires_in(),
    ))
}

/// POST /auth/register - Register a new user and return an access token.
async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    let email = payload.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::validation("email", "a valid email address is required").into());
    }
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::validation("name", "name must not be empty").into());
    }
    validate_password(&payload.password).map_err(password_error)?;

    let user_repo = UserRepository::new((*state.db).clone());
    let exists = user_repo
        .email_exists(&email)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    if exists {
        return Err(AppError::Conflict(EMAIL_TAKEN.to_string()).into());
    }

    let password_hash = hash_password(&payload.password).map_err(password_error)?;
    let user = user_repo
        .create(&email, &password_hash, name)
        .await
        .map_err(create_user_error)?;

    info!(user_id = %user.id, "User registered");

    let response = issue_token(&state, user.id)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /auth/login - Authenticate user and return an access token.
async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let invalid = || AppError::Unauthorized("Invalid email or password".to_string());
    let email = payload.email.trim().to_lowercase();

    let user_repo = UserRepository::new((*state.db).clone());
    let Some(user) = user_repo
        .find_by_email(&email)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    else {
        info!("Login attempt for non-existent user");
        return Err(invalid().into());
    };

    if !verify_password(&payload.password, &user.password_hash).map_err(password_error)? {
        info!(user_id = %user.id, "Failed login attempt - invalid password");
        return Err(invalid().into());
    }

    info!(user_id = %user.id, "User logged in successfully");

    let response = issue_token(&state, user.id)?;
    Ok((StatusCode::OK, Json(response)))
}
