// src/domain/pricing.rs
// Suggested-price formula, pure and display-agnostic

use rust_decimal::Decimal;

/// Suggested local-currency sale price for a product.
///
/// Returns zero when the cost or the exchange rate is zero; zero is the
/// sentinel for "nothing to price", not an error. No rounding happens
/// here, the display layer decides how to present the value.
pub fn suggested_price(
    cost_base: Decimal,
    margin_multiplier: Decimal,
    exchange_rate: Decimal,
) -> Decimal {
    if cost_base.is_zero() || exchange_rate.is_zero() {
        return Decimal::ZERO;
    }
    cost_base * exchange_rate * margin_multiplier
}

/// Maps a margin percentage to its price multiplier (30% -> 1.30).
/// Negative and zero margins are passed through unvalidated.
pub fn margin_multiplier(margin_pct: Decimal) -> Decimal {
    Decimal::ONE + margin_pct / Decimal::ONE_HUNDRED
}
