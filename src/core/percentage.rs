//! Percentage arithmetic shared by both sides of a deal.
//!
//! Percentages are plain [`Decimal`]s in `[0, 100]`. They are never
//! validated here: the item supplier owns range checks (see
//! [`crate::core::item`]).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Default payout for a new vendor item.
pub const DEFAULT_VENDOR_PERCENTAGE: Decimal = dec!(100);

/// Default cash-sell rate for a new collector item.
pub const DEFAULT_SELL_PERCENTAGE: Decimal = dec!(70);

/// Default trade-in rate for a new collector item.
pub const DEFAULT_TRADE_PERCENTAGE: Decimal = dec!(80);

/// Step between two adjacent picker options.
pub const OPTION_STEP: Decimal = dec!(2.5);

/// Lowest percentage offered by the picker.
pub const OPTION_FLOOR: Decimal = dec!(50);

/// The standard percentage choices, highest first: 100, 97.5, ..., 50.
pub fn percentage_options() -> Vec<Decimal> {
    let mut options = Vec::new();
    let mut current = Decimal::ONE_HUNDRED;
    while current >= OPTION_FLOOR {
        options.push(current);
        current -= OPTION_STEP;
    }
    options
}

/// Whether `percentage` is one of the standard picker choices.
pub fn is_standard_option(percentage: Decimal) -> bool {
    percentage <= Decimal::ONE_HUNDRED
        && percentage >= OPTION_FLOOR
        && (percentage % OPTION_STEP).is_zero()
}

/// Convert a percentage to a fraction: `75` becomes `0.75`.
pub fn fraction(percentage: Decimal) -> Decimal {
    percentage / Decimal::ONE_HUNDRED
}

/// Apply a percentage to a value. Saturates at [`Decimal::MAX`] rather than
/// overflowing.
pub fn apply(value: Decimal, percentage: Decimal) -> Decimal {
    value.saturating_mul(fraction(percentage))
}

/// Divide, yielding zero instead of failing when the divisor is zero or the
/// quotient overflows.
pub fn safe_div(numerator: Decimal, divisor: Decimal) -> Decimal {
    numerator.checked_div(divisor).unwrap_or(Decimal::ZERO)
}
