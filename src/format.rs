use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::DisplayConfig;

fn group_int_digits(int_part: &str) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in int_part.chars().enumerate() {
        out.push(ch);
        let remaining = len - i - 1;
        if remaining > 0 && remaining % 3 == 0 {
            out.push(',');
        }
    }
    out
}

fn pad_fraction(s: &str, dp: u32) -> String {
    let (int_part, frac_part) = s.split_once('.').unwrap_or((s, ""));
    if dp == 0 {
        return int_part.to_string();
    }
    let mut frac: String = frac_part.chars().take(dp as usize).collect();
    while frac.len() < dp as usize {
        frac.push('0');
    }
    format!("{int_part}.{frac}")
}

/// Render a money value for terminal output.
///
/// With `currency_decimals` set, the value is rounded half away from zero and
/// padded to exactly that many places; otherwise trailing zeros are stripped.
pub fn format_money(value: Decimal, display: &DisplayConfig) -> String {
    let rounded = match display.currency_decimals {
        Some(dp) => value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero),
        None => value,
    };

    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let mut digits = rounded.abs().normalize().to_string();
    if let Some(dp) = display.currency_decimals {
        digits = pad_fraction(&digits, dp);
    }
    if display.currency_grouping {
        digits = match digits.split_once('.') {
            Some((int_part, frac)) => format!("{}.{frac}", group_int_digits(int_part)),
            None => group_int_digits(&digits),
        };
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    if let Some(symbol) = &display.currency_symbol {
        out.push_str(symbol);
    }
    out.push_str(&digits);
    out
}

/// Render a percentage with an explicit sign and two decimals, e.g. `+10.00%`.
pub fn format_percent(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let body = pad_fraction(&rounded.abs().normalize().to_string(), 2);
    if rounded.is_zero() {
        format!("{body}%")
    } else if rounded.is_sign_negative() {
        format!("-{body}%")
    } else {
        format!("+{body}%")
    }
}

/// Render an unsigned share such as an allocation, e.g. `82.50%`.
pub fn format_share(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{}%", pad_fraction(&rounded.normalize().to_string(), 2))
}
