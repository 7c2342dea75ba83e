//! The functions.
//!
use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use log::*;
use crate::dates::{PointInTime, CANONICAL_DATE_FORMAT, DATE_FORMATS, DATETIME_FORMATS};
use crate::error::LogError;

/// Parse a date, optionally followed by a time, into a `PointInTime`.
///
/// Dates without a time resolve to midnight, so `17/Jul/1995` and `1995-07-17` are equal.
pub fn parse_point_in_time(
    text: &str,
) -> Result<PointInTime, LogError>
{
    let text = text.trim();

    for format in DATETIME_FORMATS {
        if let Ok(point_in_time) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(point_in_time);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Ok(date.and_time(NaiveTime::MIN));
        }
    }

    debug!("no date format matches: {}", text);
    Err(LogError::MalformedDate { text: text.to_string() })
}

/// Parse the date portion only, in any of the accepted forms.
pub fn parse_date(
    text: &str,
) -> Result<NaiveDate, LogError>
{
    parse_point_in_time(text).map(|point_in_time| point_in_time.date())
}

pub fn canonical_date(
    date: &NaiveDate,
) -> String
{
    date.format(CANONICAL_DATE_FORMAT).to_string()
}

/// Parse a `±HHMM` offset as found between the brackets of an access log timestamp.
pub fn parse_utc_offset(
    text: &str,
) -> Result<FixedOffset, LogError>
{
    let malformed = || LogError::MalformedDate { text: text.to_string() };

    let (sign, digits) = match text.as_bytes().first() {
        Some(b'+') => (1, &text[1..]),
        Some(b'-') => (-1, &text[1..]),
        _ => return Err(malformed()),
    };
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    let hours: i32 = digits[..2].parse().map_err(|_| malformed())?;
    let minutes: i32 = digits[2..].parse().map_err(|_| malformed())?;
    if minutes > 59 {
        return Err(malformed());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(malformed)
}

/// Render an offset as `UTC±HH:MM`, or plain `UTC` for a zero offset.
pub fn canonical_offset_name(
    offset: &FixedOffset,
) -> String
{
    let seconds = offset.local_minus_utc();
    if seconds == 0 {
        return "UTC".to_string();
    }
    let sign = if seconds < 0 { '-' } else { '+' };
    let seconds = seconds.abs();
    format!("UTC{}{:02}:{:02}", sign, seconds / 3600, (seconds % 3600) / 60)
}
