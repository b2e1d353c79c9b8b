//! Display formatting for receipt amounts and timestamps.
//!
//! Both helpers produce en-US output: amounts as US dollars with thousands
//! separators, timestamps as `January 5, 2024 at 03:07 PM`.

use crate::error::{FormatError, FormatResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Format an amount as US dollars, e.g. `$1,234.56`.
///
/// The amount is rounded to whole cents. Negative amounts render as
/// `-$5.00`.
///
/// # Errors
///
/// Returns `FormatError::InvalidAmount` for NaN or infinite amounts, and for
/// amounts whose cent count does not fit in a `u128`.
pub fn format_currency(amount: f64) -> FormatResult<String> {
    let scaled = (amount.abs() * 100.0).round();
    // u128::MAX as f64 rounds up to 2^128, so this also rejects the boundary
    if !scaled.is_finite() || scaled >= u128::MAX as f64 {
        return Err(FormatError::InvalidAmount(amount));
    }

    let cents = scaled as u128;
    let dollars = group_thousands(cents / 100);
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };

    Ok(format!("{}${}.{:02}", sign, dollars, cents % 100))
}

fn group_thousands(mut n: u128) -> String {
    let mut groups = Vec::new();
    while n >= 1000 {
        groups.push(format!("{:03}", n % 1000));
        n /= 1000;
    }
    groups.push(n.to_string());
    groups.reverse();
    groups.join(",")
}

/// Format a timestamp for display, e.g. `January 5, 2024 at 03:07 PM`.
///
/// Accepted inputs:
/// - RFC 3339 (`2024-01-05T15:07:00Z`, `2024-01-05T15:07:00+02:00`); the
///   wall-clock time in the given offset is shown
/// - `2024-01-05T15:07:00[.fff]` and `2024-01-05 15:07:00[.fff]`
/// - `2024-01-05` (shown as midnight)
///
/// # Errors
///
/// Returns `FormatError::InvalidDate` for anything else.
pub fn format_date(input: &str) -> FormatResult<String> {
    let input = input.trim();
    let timestamp = parse_timestamp(input)
        .ok_or_else(|| FormatError::InvalidDate(input.to_string()))?;

    Ok(timestamp.format("%B %-d, %Y at %I:%M %p").to_string())
}

fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.naive_local());
    }

    for layout in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, layout) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
