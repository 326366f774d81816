//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes under `/api/v1`
//! - Bearer token authentication middleware
//! - JSON error responses built from `AppError`, including rejected bodies
//!   and query strings

pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;


use std::sync::Arc;

use axum::Router;
use pennywise_core::budget::BudgetService;
use pennywise_core::forecast::ForecastService;
use pennywise_core::transaction::TransactionService;
use pennywise_db::{
    AccountRepository, BudgetRepository, CategoryRepository, TransactionRepository,
};
use pennywise_shared::{ForecastConfig, JwtService};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Budget service wired to the database.
pub type Budgets = BudgetService<BudgetRepository, CategoryRepository>;
/// Transaction service wired to the database.
pub type Transactions =
    TransactionService<TransactionRepository, AccountRepository, CategoryRepository>;
/// Forecast service wired to the database.
pub type Forecasts =
    ForecastService<TransactionRepository, BudgetRepository, CategoryRepository, AccountRepository>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Forecast limits.
    pub forecast: ForecastConfig,
}

impl AppState {
    fn conn(&self) -> DatabaseConnection {
        (*self.db).clone()
    }

    /// Builds the budget service for one request.
    #[must_use]
    pub fn budgets(&self) -> Budgets {
        BudgetService::new(
            Arc::new(BudgetRepository::new(self.conn())),
            Arc::new(CategoryRepository::new(self.conn())),
        )
    }

    /// Builds the transaction service for one request.
    #[must_use]
    pub fn transactions(&self) -> Transactions {
        TransactionService::new(
            Arc::new(TransactionRepository::new(self.conn())),
            Arc::new(AccountRepository::new(self.conn())),
            Arc::new(CategoryRepository::new(self.conn())),
        )
    }

    /// Builds the forecast service for one request.
    #[must_use]
    pub fn forecasts(&self) -> Forecasts {
        ForecastService::new(
            Arc::new(TransactionRepository::new(self.conn())),
            Arc::new(BudgetRepository::new(self.conn())),
            Arc::new(CategoryRepository::new(self.conn())),
            Arc::new(AccountRepository::new(self.conn())),
        )
        .with_max_window_days(self.forecast.max_window_days)
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
