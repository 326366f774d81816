//! Recurring transactions: a template plus a recurrence rule.

use chrono::NaiveDate;
use pennywise_shared::types::RecurringTransactionId;
use serde::{Deserialize, Serialize};

use super::transaction::Transaction;
use crate::recurrence::{RecurrenceError, RecurrenceRule};

/// A transaction template repeated according to a rule.
///
/// The template's `date` is the rule anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringTransaction {
    /// Set once persisted.
    pub id: Option<RecurringTransactionId>,
    /// Values copied onto every occurrence.
    pub template: Transaction,
    /// When occurrences happen.
    pub rule: RecurrenceRule,
}

impl RecurringTransaction {
    /// Creates an unsaved recurring transaction.
    ///
    /// # Errors
    ///
    /// Returns `RecurrenceError::EndBeforeAnchor` when the rule ends before the
    /// template date.
    pub fn new(template: Transaction, rule: RecurrenceRule) -> Result<Self, RecurrenceError> {
        if let Some(end) = rule.end_date {
            if end < template.date {
                return Err(RecurrenceError::EndBeforeAnchor {
                    anchor: template.date,
                    end,
                });
            }
        }

        Ok(Self {
            id: None,
            template,
            rule,
        })
    }

    /// Sets the persisted id.
    #[must_use]
    pub const fn with_id(mut self, id: RecurringTransactionId) -> Self {
        self.id = Some(id);
        self
    }

    /// Date fixing the phase of every occurrence.
    #[must_use]
    pub const fn anchor(&self) -> NaiveDate {
        self.template.date
    }
}
