//! UTC offset parser for CLI arguments.
//!
//! Supports:
//! - `Z`, `UTC`, `utc`: zero offset
//! - Signed hours: `+3`, `-5`, `+10`
//! - Signed hours and minutes: `+05:30`, `-0800`

use chrono::FixedOffset;

/// Error type for UTC offset parsing failures.
#[derive(Debug, Clone)]
pub struct OffsetParseError {
    pub input: String,
    pub message: String,
}

impl std::fmt::Display for OffsetParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Failed to parse UTC offset '{}': {}",
            self.input, self.message
        )
    }
}

impl std::error::Error for OffsetParseError {}

/// Parse a UTC offset string.
///
/// # Examples
///
/// ```
/// use dupdetail::util::parse_utc_offset;
///
/// let offset = parse_utc_offset("+05:30").unwrap();
/// assert_eq!(offset.local_minus_utc(), 5 * 3600 + 30 * 60);
/// ```
pub fn parse_utc_offset(input: &str) -> Result<FixedOffset, OffsetParseError> {
    let input = input.trim();
    let err = |message: &str| OffsetParseError {
        input: input.to_string(),
        message: message.to_string(),
    };

    if input.eq_ignore_ascii_case("z") || input.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(|| err("out of range"));
    }

    let (sign, rest) = match input.split_at_checked(1) {
        Some(("+", rest)) => (1, rest),
        Some(("-", rest)) => (-1, rest),
        _ => return Err(err("expected a sign: +HH:MM, -HH, or Z")),
    };

    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 && rest.is_ascii() => rest.split_at(2),
        None => (rest, "0"),
    };
    let hours: i32 = hours.parse().map_err(|_| err("invalid hours"))?;
    let minutes: i32 = minutes.parse().map_err(|_| err("invalid minutes"))?;
    if !(0..=14).contains(&hours) || !(0..60).contains(&minutes) {
        return Err(err("out of range"));
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(|| err("out of range"))
}
