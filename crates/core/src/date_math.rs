//! Calendar date helpers for absences.
//!
//! All arithmetic happens on calendar dates ([`NaiveDate`]); nothing here
//! converts between time zones. Timestamps with an offset keep the calendar
//! date they were written with.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime};

/// Locale used when the caller does not pick one.
pub const DEFAULT_LOCALE: &str = "en-GB";

/// Sentinel returned by [`format_date`] for input that is not a date.
pub const INVALID_DATE: &str = "Invalid Date";

/// Parse a date string leniently into a calendar date.
///
/// Accepts `YYYY-MM-DD`, naive `YYYY-MM-DDTHH:MM:SS[.fff]` and RFC 3339
/// timestamps. Returns `None` for empty or unrecognised input.
pub fn parse_calendar_date(input: &str) -> Option<NaiveDate> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Compute the last calendar day of an absence.
///
/// A one-day absence ends on its start date, so the result is
/// `start + (days - 1)`. When `days` is missing or not positive, or the
/// start date cannot be parsed, `start_date` is returned unchanged.
///
/// # Examples
///
/// ```
/// use absences_core::date_math::calculate_end_date;
/// assert_eq!(calculate_end_date("2023-10-15", Some(5)), "2023-10-19");
/// assert_eq!(calculate_end_date("2023-10-15", None), "2023-10-15");
/// ```
pub fn calculate_end_date(start_date: &str, days: Option<i64>) -> String {
    let days = match days {
        Some(d) if d > 0 => d,
        _ => return start_date.to_string(),
    };

    let Some(start) = parse_calendar_date(start_date) else {
        return start_date.to_string();
    };

    // `days` is positive here, so the cast cannot wrap.
    start
        .checked_add_days(Days::new((days - 1) as u64))
        .map(|end| end.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| start_date.to_string())
}

/// Format a date string as zero-padded day, month and year for `locale`.
///
/// - `en-US`: `MM/DD/YYYY`
/// - `de`, `de-*`: `DD.MM.YYYY`
/// - anything else (including `en-GB` and `es-*`): `DD/MM/YYYY`
///
/// Returns [`INVALID_DATE`] when the input is not a date, never the input.
///
/// # Examples
///
/// ```
/// use absences_core::date_math::format_date;
/// assert_eq!(format_date("2023-10-15", "en-GB"), "15/10/2023");
/// assert_eq!(format_date("invalid-date", "en-GB"), "Invalid Date");
/// ```
pub fn format_date(date_string: &str, locale: &str) -> String {
    let Some(date) = parse_calendar_date(date_string) else {
        return INVALID_DATE.to_string();
    };

    let (d, m, y) = (date.day(), date.month(), date.year());
    let locale = locale.to_ascii_lowercase();

    if locale == "en-us" {
        format!("{m:02}/{d:02}/{y:04}")
    } else if locale == "de" || locale.starts_with("de-") {
        format!("{d:02}.{m:02}.{y:04}")
    } else {
        format!("{d:02}/{m:02}/{y:04}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
