//! Recurrence rule types and calendar stepping.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::RecurrenceError;

/// How often a recurring transaction repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Every day.
    Daily,
    /// Every seven days.
    Weekly,
    /// Same day every calendar month, clamped to the month's last day.
    Monthly,
    /// Same day every year, Feb 29 clamps to Feb 28.
    Yearly,
}

impl Frequency {
    /// Returns the lowercase wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Date of the `n`-th occurrence, counting the anchor as occurrence 0.
    ///
    /// Returns `None` past the end of the representable calendar.
    #[must_use]
    pub fn nth(self, anchor: NaiveDate, n: u32) -> Option<NaiveDate> {
        match self {
            Self::Daily => anchor.checked_add_days(Days::new(u64::from(n))),
            Self::Weekly => anchor.checked_add_days(Days::new(u64::from(n) * 7)),
            Self::Monthly => anchor.checked_add_months(Months::new(n)),
            Self::Yearly => n
                .checked_mul(12)
                .and_then(|months| anchor.checked_add_months(Months::new(months))),
        }
    }

    /// Smallest `n` whose occurrence falls on or after `target`.
    ///
    /// Returns `None` when no such index fits in a `u32`.
    #[must_use]
    pub fn first_index_on_or_after(self, anchor: NaiveDate, target: NaiveDate) -> Option<u32> {
        if target <= anchor {
            return Some(0);
        }

        let estimate = match self {
            Self::Daily => (target - anchor).num_days(),
            Self::Weekly => {
                let days = (target - anchor).num_days();
                (days + 6) / 7
            }
            Self::Monthly => {
                i64::from(target.year() - anchor.year()) * 12 + i64::from(target.month())
                    - i64::from(anchor.month())
            }
            Self::Yearly => i64::from(target.year() - anchor.year()),
        };
        let estimate = u32::try_from(estimate).ok()?;

        // Calendar steps land in the target's month or year but may clamp
        // before the target day.
        match self.nth(anchor, estimate) {
            Some(date) if date < target => estimate.checked_add(1),
            _ => Some(estimate),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = RecurrenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(RecurrenceError::UnknownFrequency(s.to_string())),
        }
    }
}

/// When a recurring transaction repeats, and until when.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    /// Step between occurrences.
    pub frequency: Frequency,
    /// Last date an occurrence may fall on. `None` repeats forever.
    pub end_date: Option<NaiveDate>,
}

impl RecurrenceRule {
    /// Creates an open-ended rule.
    #[must_use]
    pub const fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            end_date: None,
        }
    }

    /// Sets the end date.
    #[must_use]
    pub const fn until(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }
}
