//! Numeric coercion shared by the tip and hours inputs.
//!
//! Day records arrive from user-facing forms, so amounts and hours may be
//! numbers, numeric strings, blanks or garbage. Nothing here ever fails:
//! unreadable tip amounts become zero and unreadable hours become "not worked".

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;

/// Parses the longest numeric prefix of `input`, ignoring leading whitespace.
///
/// Accepts an optional sign, digits with an optional fractional part and an
/// optional exponent. Trailing text after the number is ignored, so `"12.5h"`
/// reads as `12.5`, while text with no leading number yields `None`.
///
/// # Examples
///
/// ```
/// use tip_engine::calculation::parse_leading_decimal;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_leading_decimal(" 12.5h"), Some(Decimal::new(125, 1)));
/// assert_eq!(parse_leading_decimal(".5"), Some(Decimal::new(5, 1)));
/// assert_eq!(parse_leading_decimal("$20"), None);
/// ```
pub fn parse_leading_decimal(input: &str) -> Option<Decimal> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut pos = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_digits = &s[int_start..pos];

    let mut frac_digits = "";
    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        frac_digits = &s[frac_start..frac_end];
        pos = frac_end;
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    let mut normalized = String::with_capacity(pos + 2);
    if negative {
        normalized.push('-');
    }
    normalized.push_str(if int_digits.is_empty() { "0" } else { int_digits });
    if !frac_digits.is_empty() {
        normalized.push('.');
        normalized.push_str(frac_digits);
    }

    // Exponent only counts when it carries at least one digit ("3e" is 3).
    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut exp_end = pos + 1;
        let exp_negative = exp_end < bytes.len() && bytes[exp_end] == b'-';
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            normalized.push('e');
            if exp_negative {
                normalized.push('-');
            }
            normalized.push_str(&s[exp_digits_start..exp_end]);
            return Decimal::from_scientific(&normalized).ok();
        }
    }

    Decimal::from_str(&normalized).ok()
}

/// Reads a JSON value as a number, returning `None` for anything unreadable.
fn read_number(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_leading_decimal(&n.to_string()),
        Value::String(s) => parse_leading_decimal(s),
        _ => None,
    }
}

/// Clamps an amount to zero when it is negative.
pub fn non_negative(amount: Decimal) -> Decimal {
    amount.max(Decimal::ZERO)
}

/// Coerces a raw tip amount to a non-negative dollar value.
///
/// Blank, missing, non-numeric and negative values all become zero.
///
/// # Examples
///
/// ```
/// use tip_engine::calculation::coerce_amount;
/// use rust_decimal::Decimal;
/// use serde_json::json;
///
/// assert_eq!(coerce_amount(&json!("33.33")), Decimal::new(3333, 2));
/// assert_eq!(coerce_amount(&json!("")), Decimal::ZERO);
/// assert_eq!(coerce_amount(&json!(-5)), Decimal::ZERO);
/// ```
pub fn coerce_amount(value: &Value) -> Decimal {
    read_number(value).map(non_negative).unwrap_or(Decimal::ZERO)
}

/// Coerces a raw hours value.
///
/// Returns `None` for blank, null or non-numeric input, which means the hours
/// have not been entered. Zero is a real value and is kept as `Some(0)`.
pub fn coerce_hours(value: &Value) -> Option<Decimal> {
    read_number(value)
}

/// Rounds a dollar amount to the nearest cent, halves away from zero.
pub fn round_dollars(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a dollar amount to the nearest cent and returns it as an integer
/// cent count, or `None` if the count does not fit in an `i64`.
pub fn checked_round_to_cents(amount: Decimal) -> Option<i64> {
    round_dollars(amount)
        .checked_mul(Decimal::ONE_HUNDRED)?
        .to_i64()
}

/// Rounds a dollar amount to the nearest cent, halves away from zero, and
/// returns it as an integer cent count.
///
/// Amounts too large for an `i64` cent count saturate.
pub fn round_to_cents(amount: Decimal) -> i64 {
    checked_round_to_cents(amount).unwrap_or(if amount.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

/// Converts a cent count to a dollar amount with exactly two decimal places.
pub fn cents_to_dollars(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}
