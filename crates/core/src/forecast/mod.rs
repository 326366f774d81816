//! Budget forecasting.
//!
//! Expands recurring rules over a window, merges them with one-off
//! transactions, and compares the result with budget limits and account
//! balances. Aggregation is pure; the service only adds the concurrent fetch.

pub mod aggregate;
pub mod error;
pub mod service;
pub mod types;


pub use aggregate::{ForecastInputs, aggregate};
pub use error::ForecastError;
pub use service::{DEFAULT_MAX_WINDOW_DAYS, ForecastService};
pub use types::{
    AccountProjection, BudgetForecast, CategoryTotal, DateWindow, ForecastFilter, ForecastResult,
};
