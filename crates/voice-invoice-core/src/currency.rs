//! Rounding and GBP formatting shared by the engine and every call-site view.
//!
//! Rounding is always half-up (midpoint away from zero) to whole pence. The
//! `Decimal::round_dp` default is banker's rounding, which would disagree
//! with what customers compute by hand, so it is never used for money here.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::InvoiceError;
use crate::types::Money;
use crate::InvoiceResult;

/// Decimal places carried by every finalised currency amount.
pub const MONEY_DP: u32 = 2;

/// Round to whole pence, half-up, and pin the scale to exactly two places so
/// that `135` and `135.00` serialise identically.
pub fn round_money(amount: Money) -> Money {
    let mut rounded = amount.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_DP);
    rounded
}

/// Convert a floating-point amount into a `Decimal`.
///
/// Returns `None` for NaN and infinities; floating-point callers (the Node
/// bindings) are the only place such values can come from.
pub fn money_from_f64(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_f64(value)
}

/// Amount in pence, for payment providers that charge in minor units.
pub fn to_pence(amount: Money) -> InvoiceResult<i64> {
    (round_money(amount) * Decimal::ONE_HUNDRED)
        .to_i64()
        .ok_or_else(|| InvoiceError::invalid("amount", "Amount too large to express in pence"))
}

/// Format an amount as `£1,234.56`.
///
/// Negative amounts are not produced by the engine; if one is passed the
/// sign is rendered before the symbol (`-£5.00`).
pub fn format_gbp(amount: Money) -> String {
    let rounded = round_money(amount);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().to_string();

    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, f),
        None => (digits.as_str(), "00"),
    };

    format!(
        "{}£{}.{}",
        if negative { "-" } else { "" },
        group_thousands(int_part),
        frac_part
    )
}

fn group_thousands(int_part: &str) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_money_half_up() {
        assert_eq!(round_money(dec!(0.005)), dec!(0.01));
        assert_eq!(round_money(dec!(0.015)), dec!(0.02));
        assert_eq!(round_money(dec!(0.025)), dec!(0.03));
        assert_eq!(round_money(dec!(2.344)), dec!(2.34));
    }

    #[test]
    fn test_round_money_pins_scale() {
        assert_eq!(round_money(dec!(135)).to_string(), "135.00");
        assert_eq!(round_money(dec!(72.5)).to_string(), "72.50");
        assert_eq!(round_money(dec!(0)).to_string(), "0.00");
    }

    #[test]
    fn test_format_gbp_basic() {
        assert_eq!(format_gbp(dec!(123.45)), "£123.45");
        assert_eq!(format_gbp(dec!(0)), "£0.00");
        assert_eq!(format_gbp(dec!(432)), "£432.00");
    }

    #[test]
    fn test_format_gbp_thousands() {
        assert_eq!(format_gbp(dec!(1234.5)), "£1,234.50");
        assert_eq!(format_gbp(dec!(999999.999)), "£1,000,000.00");
        assert_eq!(format_gbp(dec!(100000)), "£100,000.00");
        assert_eq!(format_gbp(dec!(999.99)), "£999.99");
    }

    #[test]
    fn test_format_gbp_negative() {
        assert_eq!(format_gbp(dec!(-5)), "-£5.00");
        assert_eq!(format_gbp(dec!(-0.001)), "£0.00");
    }

    #[test]
    fn test_money_from_f64_rejects_non_finite() {
        assert_eq!(money_from_f64(f64::NAN), None);
        assert_eq!(money_from_f64(f64::INFINITY), None);
        assert_eq!(money_from_f64(f64::NEG_INFINITY), None);
        assert_eq!(money_from_f64(45.0), Some(dec!(45)));
    }

    #[test]
    fn test_to_pence() {
        assert_eq!(to_pence(dec!(432.00)).unwrap(), 43_200);
        assert_eq!(to_pence(dec!(0.005)).unwrap(), 1);
        assert_eq!(to_pence(dec!(0)).unwrap(), 0);
    }
}
