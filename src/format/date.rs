//! Lenient parsing of ISO-like date strings stored in date/ctime/mtime cells.
//!
//! Accepted inputs:
//! - Date only: `2024-01-02`
//! - Date and time: `2024-01-02 10:30`, `2024-01-02T10:30:15`, fractional seconds allowed
//! - RFC 3339 with zone: `2024-01-02T10:30:15.123+00:00`, `2024-01-02T10:30:15Z`
//! - Zone without colon: `2024-01-02T10:30:15+0800`, `2024-01-02 10:30:15.000+0000`
//!
//! Zoned timestamps are shifted into the display offset; naive ones are shown as written.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

/// Display format for date cells.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Display format for ctime/mtime cells.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const ZONED_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses a raw cell string into a local (display) date-time.
pub fn parse_local(input: &str, offset: FixedOffset) -> Option<NaiveDateTime> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&offset).naive_local());
    }

    // RFC 3339 requires seconds; accept `2024-01-02T10:30+08:00` as well.
    if let Ok(dt) = DateTime::parse_from_str(input, "%Y-%m-%dT%H:%M%:z") {
        return Some(dt.with_timezone(&offset).naive_local());
    }

    for fmt in ZONED_DATE_TIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(input, fmt) {
            return Some(dt.with_timezone(&offset).naive_local());
        }
    }

    for fmt in NAIVE_DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, fmt) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Formats a raw cell string with `fmt`, or `None` when it does not parse.
pub fn format_with(input: &str, offset: FixedOffset, fmt: &str) -> Option<String> {
    parse_local(input, offset).map(|dt| dt.format(fmt).to_string())
}
