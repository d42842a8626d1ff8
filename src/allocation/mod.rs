//! Settlement allocation: valuing items and balancing one side against
//! the other.

pub mod settlement;
pub mod summary;
pub mod valuation;

use rust_decimal::Decimal;

/// Sum amounts, clamping at the bounds of [`Decimal`] instead of overflowing.
pub(crate) fn total(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |acc, amount| acc.saturating_add(amount))
}

/// Round to cents for display, dropping trailing zeros.
pub(crate) fn rounded(amount: Decimal) -> Decimal {
    amount.round_dp(2).normalize()
}
