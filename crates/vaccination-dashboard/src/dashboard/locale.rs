//! pt-BR number rendering for the summary cards (`#,##0.###`).

const GROUP_SEPARATOR: char = '.';
const DECIMAL_SEPARATOR: char = ',';
const MAX_FRACTION_DIGITS: usize = 3;

pub fn format_integer(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let grouped = group_thousands(&digits);
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

pub fn format_count(value: usize) -> String {
    group_thousands(&value.to_string())
}

/// Up to three fraction digits, trailing zeros dropped.
pub fn format_decimal(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }

    let rendered = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (whole, fraction) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');
    let negative = value < 0.0 && (whole != "0" || !fraction.is_empty());

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(whole));
    if !fraction.is_empty() {
        out.push(DECIMAL_SEPARATOR);
        out.push_str(fraction);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(ch);
    }
    out
}
