//! UTC wall-clock formatting without a calendar dependency.
//!
//! Timestamps are rendered straight from the Unix epoch using the
//! proleptic Gregorian calendar, so the library carries no timezone
//! database. All stamps are UTC.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Returns the current UTC time as `YYYY-MM-DD HH:MM:SS.ffffff`.
#[must_use]
pub fn utc_timestamp() -> String {
    format_timestamp(unix_now())
}

/// Returns the current UTC time as a compact `YYYYMMDD-HHMMSS` stamp.
#[must_use]
pub fn utc_compact() -> String {
    format_compact(unix_now())
}

/// Formats a duration since the Unix epoch as `YYYY-MM-DD HH:MM:SS.ffffff`.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// let stamp = ictus::clock::format_timestamp(Duration::ZERO);
/// assert_eq!(stamp, "1970-01-01 00:00:00.000000");
/// ```
#[must_use]
pub fn format_timestamp(since_epoch: Duration) -> String {
    let secs = since_epoch.as_secs();
    let micros = since_epoch.subsec_micros();
    let (year, month, day) = civil_from_days((secs / 86_400) as i64);
    let tod = secs % 86_400;
    format!(
        "{year:04}-{month:02}-{day:02} {:02}:{:02}:{:02}.{micros:06}",
        tod / 3600,
        (tod % 3600) / 60,
        tod % 60
    )
}

/// Formats a duration since the Unix epoch as `YYYYMMDD-HHMMSS`.
#[must_use]
pub fn format_compact(since_epoch: Duration) -> String {
    let secs = since_epoch.as_secs();
    let (year, month, day) = civil_from_days((secs / 86_400) as i64);
    let tod = secs % 86_400;
    format!(
        "{year:04}{month:02}{day:02}-{:02}{:02}{:02}",
        tod / 3600,
        (tod % 3600) / 60,
        tod % 60
    )
}

/// Extracts the `YYYY-MM-DD` calendar date prefix from a timestamp.
///
/// Returns `None` when the first ten characters are not a valid
/// calendar date.
///
/// # Examples
///
/// ```
/// use ictus::clock::date_prefix;
///
/// assert_eq!(date_prefix("2026-08-22 14:03:55.123456"), Some("2026-08-22"));
/// assert_eq!(date_prefix("2026-02-30 00:00:00"), None);
/// assert_eq!(date_prefix("garbage"), None);
/// ```
#[must_use]
pub fn date_prefix(timestamp: &str) -> Option<&str> {
    let prefix = timestamp.get(..10)?;
    let bytes = prefix.as_bytes();
    if bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    for (i, b) in bytes.iter().enumerate() {
        if i != 4 && i != 7 && !b.is_ascii_digit() {
            return None;
        }
    }
    let year: i64 = prefix[..4].parse().ok()?;
    let month: u32 = prefix[5..7].parse().ok()?;
    let day: u32 = prefix[8..10].parse().ok()?;
    if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
        return None;
    }
    Some(prefix)
}

fn unix_now() -> Duration {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
}

fn days_in_month(year: i64, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

fn is_leap_year(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Gregorian date for a day count since 1970-01-01 (Howard Hinnant's
/// `civil_from_days`).
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
    let year = if month <= 2 {
        yoe + era * 400 + 1
    } else {
        yoe + era * 400
    };
    (year, month, day)
}
