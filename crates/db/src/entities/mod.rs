//! `SeaORM` entity definitions.
//!
//! One module per table, plus the shared Postgres enum.

pub mod prelude;

pub mod accounts;
pub mod budgets;
pub mod categories;
pub mod recurring_transactions;
pub mod sea_orm_active_enums;
pub mod transactions;
pub mod users;
