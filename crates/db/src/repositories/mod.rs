//! Repository implementations for data access.
//!
//! Each repository implements the matching `pennywise_core::repository` trait,
//! hiding the `SeaORM` details from the rest of the application. Every query is
//! scoped to the calling user.

pub mod account;
pub mod budget;
pub mod category;
pub mod transaction;
pub mod user;


pub use account::AccountRepository;
pub use budget::BudgetRepository;
pub use category::CategoryRepository;
pub use transaction::TransactionRepository;
pub use user::{UserRepository, is_unique_violation};

use pennywise_core::records::TransactionType;
use pennywise_core::repository::RepositoryError;
use sea_orm::DbErr;

use crate::entities::sea_orm_active_enums::TransactionKind;

/// Maps a database error to a storage failure.
pub(crate) fn storage(err: DbErr) -> RepositoryError {
    RepositoryError::Storage(err.to_string())
}

/// Convert domain transaction type to database enum.
pub(crate) const fn to_db_kind(kind: TransactionType) -> TransactionKind {
    match kind {
        TransactionType::Income => TransactionKind::Income,
        TransactionType::Expense => TransactionKind::Expense,
    }
}

/// Convert database enum to domain transaction type.
pub(crate) const fn from_db_kind(kind: TransactionKind) -> TransactionType {
    match kind {
        TransactionKind::Income => TransactionType::Income,
        TransactionKind::Expense => TransactionType::Expense,
    }
}
