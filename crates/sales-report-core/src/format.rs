//! The single display convention used by every report section.
//!
//! Money renders as `R$ 1.234,50` (point for thousands, comma for decimals).
//! Percentages and per-day averages keep a point as the decimal separator.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::Money;

pub const CURRENCY_SYMBOL: &str = "R$";

/// Marker rendered where a percentage change is undefined.
pub const NO_DATA_MARKER: &str = "-";

fn round_half_even(value: Decimal, dp: u32) -> Decimal {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven);
    // Avoid rendering "-0.00"
    if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    }
}

/// Insert `separator` between every group of three digits, counting from the right.
fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

/// Format a monetary amount as a fixed-currency string, e.g. `1234.5` → `R$ 1.234,50`.
pub fn format_currency(amount: Money) -> String {
    let rounded = round_half_even(amount, 2);
    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    let plain = format!("{:.2}", rounded.abs());
    let (whole, cents) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));
    format!(
        "{CURRENCY_SYMBOL} {sign}{},{cents}",
        group_thousands(whole, '.')
    )
}

/// Format a percentage with an explicit sign and two decimals, e.g. `+25.00%`.
pub fn format_percent(value: Decimal) -> String {
    let rounded = round_half_even(value, 2);
    if rounded.is_sign_positive() && !rounded.is_zero() {
        format!("+{:.2}%", rounded)
    } else {
        format!("{:.2}%", rounded)
    }
}

/// Format a value with one decimal place, e.g. `2.5`.
pub fn format_one_decimal(value: Decimal) -> String {
    format!("{:.1}", round_half_even(value, 1))
}
