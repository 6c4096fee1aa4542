//! Date utility functions
//!
//! Primitive date arithmetic shared by the status calculator and the request
//! book. Dates travel through the application as strings and are parsed on
//! use, so every helper that accepts a string degrades to a sentinel instead
//! of failing.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

/// Storage format for date-only values
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Storage format for date-time values
pub const ISO_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Display pattern for dates, in the token syntax understood by [`format`]
pub const DISPLAY_DATE_PATTERN: &str = "dd/MM/yyyy";

/// Display pattern for date-times, in the token syntax understood by [`format`]
pub const DISPLAY_DATETIME_PATTERN: &str = "dd/MM/yyyy HH:mm";

/// Parse a stored date string into a local date-time
///
/// Accepts `YYYY-MM-DD` (midnight), `YYYY-MM-DDTHH:MM[:SS[.fff]]`,
/// `YYYY-MM-DD HH:MM[:SS[.fff]]` and RFC 3339 (converted to local time).
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Local).naive_local());
    }

    for fmt in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(value, ISO_DATE_FORMAT)
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// Format a NaiveDate to YYYY-MM-DD string
pub fn format_ymd(d: NaiveDate) -> String {
    d.format(ISO_DATE_FORMAT).to_string()
}

/// Format a date-time for storage
pub fn format_iso(dt: NaiveDateTime) -> String {
    dt.format(ISO_DATETIME_FORMAT).to_string()
}

/// Zero out the time part of a date-time
pub fn start_of_day(dt: NaiveDateTime) -> NaiveDateTime {
    dt.date().and_time(NaiveTime::MIN)
}

/// Whole calendar days between two date-times, ignoring time of day
///
/// Negative when `left` precedes `right`.
pub fn difference_in_days(left: NaiveDateTime, right: NaiveDateTime) -> i64 {
    (start_of_day(left) - start_of_day(right)).num_days()
}

/// Strict timestamp comparison: `date` is earlier than `compare_to`
///
/// Unlike [`difference_in_days`] this is sensitive to the time of day.
pub fn is_before(date: NaiveDateTime, compare_to: NaiveDateTime) -> bool {
    date < compare_to
}

/// Strict timestamp comparison: `date` is later than `compare_to`
pub fn is_after(date: NaiveDateTime, compare_to: NaiveDateTime) -> bool {
    date > compare_to
}

/// Shift forward by whole days; `None` when the result leaves chrono's range
pub fn add_days(dt: NaiveDateTime, amount: i64) -> Option<NaiveDateTime> {
    TimeDelta::try_days(amount).and_then(|delta| dt.checked_add_signed(delta))
}

pub fn sub_days(dt: NaiveDateTime, amount: i64) -> Option<NaiveDateTime> {
    TimeDelta::try_days(amount).and_then(|delta| dt.checked_sub_signed(delta))
}

/// Render a date-time through a token pattern
///
/// Recognized tokens are `dd`, `MM`, `yyyy`, `yy`, `HH` and `mm`. Only the
/// first occurrence of each token is substituted, in that order; anything
/// else in the pattern is copied through unchanged.
pub fn format(dt: NaiveDateTime, pattern: &str) -> String {
    let year = dt.format("%Y").to_string();
    let short_year = year[year.len().saturating_sub(2)..].to_string();

    pattern
        .replacen("dd", &dt.format("%d").to_string(), 1)
        .replacen("MM", &dt.format("%m").to_string(), 1)
        .replacen("yyyy", &year, 1)
        .replacen("yy", &short_year, 1)
        .replacen("HH", &dt.format("%H").to_string(), 1)
        .replacen("mm", &dt.format("%M").to_string(), 1)
}

/// Render a stored date string through a token pattern
///
/// Returns an empty string when the input cannot be parsed.
pub fn format_str(value: &str, pattern: &str) -> String {
    parse_datetime(value)
        .map(|dt| format(dt, pattern))
        .unwrap_or_default()
}
