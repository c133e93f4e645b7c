use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds `value` to `dp` decimal places, midpoints away from zero.
///
/// This is `round(v * 10^dp) / 10^dp` done exactly. Inputs in valid domains are
/// never negative, so this is the same as rounding half up.
pub fn round_to(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}
