//! Bounds for stored money amounts.
//!
//! Amount columns are `NUMERIC(19,4)`, so anything with more than four
//! decimal places or fifteen integer digits cannot be stored as given.

use rust_decimal::Decimal;
use thiserror::Error;

/// Decimal places an amount may carry.
pub const MAX_AMOUNT_SCALE: u32 = 4;

/// Exclusive upper bound on the magnitude of an amount (10^15).
pub const AMOUNT_LIMIT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Why an amount cannot be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AmountError {
    /// Below zero.
    #[error("amount must not be negative")]
    Negative,
    /// Too many decimal places.
    #[error("amount must have at most {MAX_AMOUNT_SCALE} decimal places")]
    TooPrecise,
    /// Fifteen or more integer digits.
    #[error("amount must be less than 1000000000000000")]
    TooLarge,
}

/// Checks that `amount` is non-negative and fits the amount columns.
///
/// Trailing zeros do not count against the scale, so `1.50000` passes.
///
/// # Errors
///
/// Returns the first bound the amount violates.
pub fn check_amount(amount: Decimal) -> Result<(), AmountError> {
    if amount < Decimal::ZERO {
        return Err(AmountError::Negative);
    }
    if amount.normalize().scale() > MAX_AMOUNT_SCALE {
        return Err(AmountError::TooPrecise);
    }
    if amount.abs() >= AMOUNT_LIMIT {
        return Err(AmountError::TooLarge);
    }
    Ok(())
}
