//! Budget tracking and variance analysis.

pub mod error;
pub mod service;
pub mod types;
pub mod variance;


pub use error::BudgetError;
pub use service::BudgetService;
pub use types::{Budget, BudgetInput, CategorySelector};
pub use variance::{BudgetVariance, VarianceStatus};
