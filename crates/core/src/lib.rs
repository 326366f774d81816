//! Core business logic for Pennywise.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here; storage is
//! reached only through the traits in [`repository`].
//!
//! # Modules
//!
//! - `records` - Transactions, recurring transactions, categories, accounts
//! - `recurrence` - Expansion of recurring rules into dated occurrences
//! - `forecast` - Projection of budgets and accounts over a date window
//! - `budget` - Budget rules and variance analysis
//! - `transaction` - Transaction and recurring-transaction rules
//! - `auth` - Password hashing

pub mod auth;
pub mod budget;
pub mod forecast;
pub mod records;
pub mod recurrence;
pub mod repository;
pub mod transaction;

#[cfg(test)]
pub(crate) mod testing;
