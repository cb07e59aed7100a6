use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Largest accepted amount, in whole currency units.
pub const MAX_WHOLE_AMOUNT: i64 = 1_000_000_000_000_000;

/// Parse a currency string such as "6.49", "-6.25" or "1e2".
///
/// Digit separators (`1_000`) are not accepted, and neither is any amount
/// above [`MAX_WHOLE_AMOUNT`], so points derived from a parsed amount
/// always fit in a `u64`.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    if s.contains('_') {
        return None;
    }

    let amount = Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()?;

    if amount > Decimal::from(MAX_WHOLE_AMOUNT) {
        return None;
    }
    Some(amount)
}

/// Round to the nearest cent, halves away from zero.
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
