//! One-off transactions and the income/expense direction.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use pennywise_shared::types::{AccountId, CategoryId, TransactionId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Direction of money flow.
///
/// Shared by transactions, categories, and budget overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in.
    Income,
    /// Money going out.
    Expense,
}

impl TransactionType {
    /// Returns the lowercase wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown transaction type string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown transaction type: {0}")]
pub struct ParseTransactionTypeError(pub String);

impl FromStr for TransactionType {
    type Err = ParseTransactionTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(ParseTransactionTypeError(s.to_string())),
        }
    }
}

/// A dated, categorized movement of money on an account.
///
/// `amount` is a magnitude; direction comes from `transaction_type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Set once persisted.
    pub id: Option<TransactionId>,
    /// Owner.
    pub user_id: UserId,
    /// Account the money moves on.
    pub account_id: AccountId,
    /// Category used for budgeting.
    pub category_id: CategoryId,
    /// Non-negative magnitude.
    pub amount: Decimal,
    /// Income or expense.
    pub transaction_type: TransactionType,
    /// Booking date. For recurring templates this is the rule anchor.
    pub date: NaiveDate,
    /// Optional counterparty.
    pub payee: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
}

impl Transaction {
    /// Creates an unsaved transaction.
    #[must_use]
    pub const fn new(
        user_id: UserId,
        account_id: AccountId,
        category_id: CategoryId,
        amount: Decimal,
        transaction_type: TransactionType,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            user_id,
            account_id,
            category_id,
            amount,
            transaction_type,
            date,
            payee: None,
            notes: None,
        }
    }

    /// Sets the persisted id.
    #[must_use]
    pub const fn with_id(mut self, id: TransactionId) -> Self {
        self.id = Some(id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn sample(kind: TransactionType) -> Transaction {
        Transaction::new(
            UserId::new(),
            AccountId::new(),
            CategoryId::new(),
            dec!(42.50),
            kind,
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        )
    }

    #[rstest]
    #[case("income", TransactionType::Income)]
    #[case("expense", TransactionType::Expense)]
    #[case(" Expense ", TransactionType::Expense)]
    #[case("INCOME", TransactionType::Income)]
    fn test_parse_transaction_type(#[case] input: &str, #[case] expected: TransactionType) {
        assert_eq!(input.parse::<TransactionType>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown_transaction_type() {
        let err = "transfer".parse::<TransactionType>().unwrap_err();
        assert_eq!(err, ParseTransactionTypeError("transfer".to_string()));
    }

    #[test]
    fn test_transaction_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&TransactionType::Expense).unwrap(),
            "\"expense\""
        );
        assert_eq!(TransactionType::Income.to_string(), "income");
    }

    #[test]
    fn test_with_id() {
        let id = TransactionId::new();
        let tx = sample(TransactionType::Expense).with_id(id);

        assert_eq!(tx.id, Some(id));
        assert_eq!(tx.amount, dec!(42.50));
        assert!(tx.payee.is_none());
    }
}
