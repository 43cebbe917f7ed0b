//! Money helpers.
//!
//! All monetary amounts are `rust_decimal::Decimal` in their natural form
//! (e.g. `44.99`), never cents. Derived values are rounded to two decimals
//! half-up at each computation boundary so that repeated edits never
//! accumulate floating drift.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a monetary amount to two decimal places, half-up.
pub fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns `amount` if present, otherwise zero.
///
/// Items without a price ("price pending") contribute nothing to any total.
pub fn or_zero(amount: Option<Decimal>) -> Decimal {
    amount.unwrap_or(Decimal::ZERO)
}
