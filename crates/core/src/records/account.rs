//! User accounts (checking, savings, cards).

use pennywise_shared::types::{AccountId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An account holding a balance. Read-only to the forecaster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account ID.
    pub id: AccountId,
    /// Owner.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Free-form kind, e.g. `checking` or `credit_card`.
    pub account_type: String,
    /// Current balance.
    pub balance: Decimal,
    /// ISO 4217 code. Amounts are never converted.
    pub currency: String,
    /// Free-form notes.
    pub notes: Option<String>,
}
