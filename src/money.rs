//! Money

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{
    Money,
    iso::{self, Currency},
};

/// Currency every storefront amount is charged in.
pub fn currency() -> &'static Currency {
    iso::EUR
}

/// Round an amount to two decimal places, half away from zero.
pub fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount for display in the storefront currency.
pub fn format_amount(amount: Decimal) -> String {
    Money::from_decimal(round2(amount), currency()).to_string()
}

/// Parse a user-entered amount.
///
/// Accepts either `.` or `,` as the decimal separator so Swedish-formatted
/// input (`"12,50"`) parses the same as `"12.50"`. Returns `None` for anything
/// that is not a number.
pub fn parse_amount(input: &str) -> Option<Decimal> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return None;
    }

    let normalised = if trimmed.contains('.') {
        trimmed.to_owned()
    } else {
        trimmed.replacen(',', ".", 1)
    };

    Decimal::from_str(&normalised).ok()
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn round2_rounds_midpoint_away_from_zero() {
        assert_eq!(round2(dec!(10.545)), dec!(10.55));
        assert_eq!(round2(dec!(-10.545)), dec!(-10.55));
        assert_eq!(round2(dec!(10.544)), dec!(10.54));
    }

    #[test]
    fn parse_amount_accepts_both_separators() {
        assert_eq!(parse_amount("12.50"), Some(dec!(12.50)));
        assert_eq!(parse_amount(" 12,50 "), Some(dec!(12.50)));
        assert_eq!(parse_amount("7"), Some(dec!(7)));
    }

    #[test]
    fn parse_amount_rejects_garbage() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("1.2.3"), None);
    }

    #[test]
    fn format_amount_mentions_the_rounded_value() {
        let formatted = format_amount(dec!(10.544));

        assert!(formatted.contains("10"), "unexpected format: {formatted}");
        assert!(formatted.contains("54"), "unexpected format: {formatted}");
    }
}
