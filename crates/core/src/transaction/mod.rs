//! Transaction and recurring-transaction management.

pub mod error;
pub mod service;

#[cfg(test)]
mod tests;

pub use error::TransactionError;
pub use service::{RecurringInput, TransactionInput, TransactionService};
