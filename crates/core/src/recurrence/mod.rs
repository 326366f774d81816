//! Recurrence expansion.
//!
//! Turns a recurring transaction into the concrete occurrences that fall in a
//! date window. Every occurrence is computed from the rule anchor, so a
//! month-end anchor clamps to shorter months without drifting:
//!
//! ```text
//! anchor 2024-01-31, monthly  ->  01-31, 02-29, 03-31, 04-30, ...
//! ```

pub mod error;
pub mod expander;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::RecurrenceError;
pub use expander::{Occurrence, OccurrenceSource, Occurrences, expand};
pub use types::{Frequency, RecurrenceRule};
