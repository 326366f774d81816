//! Lazy expansion of recurring transactions into occurrences.

use chrono::NaiveDate;
use pennywise_shared::types::{AccountId, CategoryId, RecurringTransactionId, TransactionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::RecurrenceError;
use crate::records::{RecurringTransaction, Transaction, TransactionType};

/// Where an occurrence came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum OccurrenceSource {
    /// A one-off transaction, seen as its own single occurrence.
    OneOff(Option<TransactionId>),
    /// Generated from a recurring rule.
    Recurring(Option<RecurringTransactionId>),
}

/// One dated instance of money movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    /// Date the money moves.
    pub date: NaiveDate,
    /// Non-negative magnitude.
    pub amount: Decimal,
    /// Category.
    pub category_id: CategoryId,
    /// Account.
    pub account_id: AccountId,
    /// Income or expense.
    pub transaction_type: TransactionType,
    /// Originating record.
    pub source: OccurrenceSource,
}

impl From<&Transaction> for Occurrence {
    fn from(tx: &Transaction) -> Self {
        Self {
            date: tx.date,
            amount: tx.amount,
            category_id: tx.category_id,
            account_id: tx.account_id,
            transaction_type: tx.transaction_type,
            source: OccurrenceSource::OneOff(tx.id),
        }
    }
}

/// Iterator over the occurrences of one rule inside a window.
///
/// State is a single step index over the anchor; expanding identical inputs
/// always yields identical sequences.
#[derive(Debug, Clone)]
pub struct Occurrences<'a> {
    rule: &'a RecurringTransaction,
    next: Option<u32>,
    last: NaiveDate,
}

impl Iterator for Occurrences<'_> {
    type Item = Occurrence;

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.next?;
        let date = self
            .rule
            .rule
            .frequency
            .nth(self.rule.anchor(), n)
            .filter(|date| *date <= self.last);

        let Some(date) = date else {
            self.next = None;
            return None;
        };
        self.next = n.checked_add(1);

        let template = &self.rule.template;
        Some(Occurrence {
            date,
            amount: template.amount,
            category_id: template.category_id,
            account_id: template.account_id,
            transaction_type: template.transaction_type,
            source: OccurrenceSource::Recurring(self.rule.id),
        })
    }
}

/// Expands `rule` into its occurrences within `[window_start, window_end]`.
///
/// # Errors
///
/// Returns `RecurrenceError::InvalidWindow` when `window_start > window_end`
/// and `RecurrenceError::EndBeforeAnchor` for a rule ending before its anchor.
pub fn expand(
    rule: &RecurringTransaction,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> Result<Occurrences<'_>, RecurrenceError> {
    if window_start > window_end {
        return Err(RecurrenceError::InvalidWindow {
            start: window_start,
            end: window_end,
        });
    }

    let anchor = rule.anchor();
    let last = match rule.rule.end_date {
        Some(end) if end < anchor => {
            return Err(RecurrenceError::EndBeforeAnchor { anchor, end });
        }
        Some(end) => end.min(window_end),
        None => window_end,
    };

    Ok(Occurrences {
        rule,
        next: rule.rule.frequency.first_index_on_or_after(anchor, window_start),
        last,
    })
}
