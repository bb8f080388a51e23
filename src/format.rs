//! Display formatting helpers for dashboard cells.
//!
//! Pure and stateless. Absent values render as `-` so empty cells stay
//! visually aligned in tables.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

/// Year, two-digit month, two-digit day — the dashboard's default rendering.
const DEFAULT_DATE_PATTERN: &str = "%Y. %m. %d.";

/// Format a monetary amount. KRW amounts use the won sign and no decimals;
/// other known currencies use their symbol, anything else falls back to
/// `CODE amount`.
pub fn format_currency(value: Option<f64>, currency: &str) -> String {
    let Some(value) = value else {
        return "-".to_string();
    };

    let code = currency.to_ascii_uppercase();
    let (symbol, decimals) = match code.as_str() {
        "KRW" => ("₩", 0),
        "JPY" => ("¥", 0),
        "USD" => ("$", 2),
        "EUR" => ("€", 2),
        "GBP" => ("£", 2),
        _ => ("", 2),
    };

    let sign = if value < 0.0 { "-" } else { "" };
    let amount = format_number(Some(value.abs()), decimals);
    if symbol.is_empty() {
        format!("{} {}{}", code, sign, amount)
    } else {
        format!("{}{}{}", sign, symbol, amount)
    }
}

/// Format a date cell. Accepts date/time strings or epoch-millisecond numbers
/// as they appear in result rows; `pattern` overrides the default chrono
/// pattern.
pub fn format_date(value: Option<&Value>, pattern: Option<&str>) -> String {
    let parsed = match value {
        None | Some(Value::Null) => return "-".to_string(),
        Some(Value::String(s)) if s.is_empty() => return "-".to_string(),
        Some(Value::String(s)) => parse_date_text(s),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        Some(_) => None,
    };

    match parsed {
        Some(date) => date
            .format(pattern.unwrap_or(DEFAULT_DATE_PATTERN))
            .to_string(),
        None => "Invalid Date".to_string(),
    }
}

fn parse_date_text(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(s) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    if let Ok(date) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(date.and_utc());
    }
    None
}

/// Fixed-decimal number with thousands grouping.
pub fn format_number(value: Option<f64>, decimals: usize) -> String {
    let Some(value) = value else {
        return "-".to_string();
    };

    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let mut out = String::new();
    if value < 0.0 {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac_part) = frac_part {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*byte as char);
    }
    out
}

/// Two-decimal percentage; `is_decimal` scales fractional inputs by 100 first.
pub fn format_percentage(value: Option<f64>, is_decimal: bool) -> String {
    let Some(value) = value else {
        return "-".to_string();
    };
    let percent = if is_decimal { value * 100.0 } else { value };
    format!("{}%", format_number(Some(percent), 2))
}

/// Relative change between two periods, in percent. Zero previous yields zero
/// rather than dividing by it.
pub fn calculate_percentage_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    (current - previous) / previous * 100.0
}

/// Truncate to `max_length` characters with an ellipsis marker.
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_length).collect();
    format!("{}...", truncated)
}
