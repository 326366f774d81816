//! Persisted domain records.
//!
//! Records carry ids only; they never hold references to one another.

pub mod account;
pub mod amount;
pub mod category;
pub mod recurring;
pub mod transaction;

pub use account::Account;
pub use amount::{AmountError, check_amount};
pub use category::{Category, Color, ColorError, NewCategory};
pub use recurring::RecurringTransaction;
pub use transaction::{ParseTransactionTypeError, Transaction, TransactionType};
