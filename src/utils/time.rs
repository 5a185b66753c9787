//! Time utilities: parsing HH:MM times of day, H:MM:SS durations,
//! RFC3339 instants and fixed timezone offsets.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, FixedOffset, NaiveTime, Utc};
use regex::Regex;

/// Parse a time of day, accepting "HH:MM" or "HH:MM:SS".
pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M:%S"))
        .ok()
}

pub fn parse_time_arg(t: &str) -> AppResult<NaiveTime> {
    parse_time(t).ok_or_else(|| AppError::InvalidTime(t.to_string()))
}

/// Parse an "H:MM:SS"-shaped duration string into seconds.
/// Hours are unbounded, minutes and seconds must stay below 60.
pub fn parse_duration_hms(s: &str) -> AppResult<i64> {
    let re = Regex::new(r"^(\d+):([0-5]\d):([0-5]\d)$").expect("static regex");
    let caps = re
        .captures(s.trim())
        .ok_or_else(|| AppError::InvalidDuration(s.to_string()))?;

    let hours: i64 = caps[1]
        .parse()
        .map_err(|_| AppError::InvalidDuration(s.to_string()))?;
    let minutes: i64 = caps[2].parse().expect("matched \\d\\d");
    let seconds: i64 = caps[3].parse().expect("matched \\d\\d");

    Ok(hours * 3600 + minutes * 60 + seconds)
}

/// Format seconds back into "H:MM:SS".
pub fn format_duration_secs(secs: i64) -> String {
    let s = secs.max(0);
    format!("{}:{:02}:{:02}", s / 3600, (s % 3600) / 60, s % 60)
}

/// Parse a fixed timezone offset like "+08:00" or "-03:30".
pub fn parse_tz_offset(s: &str) -> AppResult<FixedOffset> {
    let re = Regex::new(r"^([+-])(\d{2}):(\d{2})$").expect("static regex");
    let caps = re
        .captures(s.trim())
        .ok_or_else(|| AppError::InvalidTimezone(s.to_string()))?;

    let hours: i32 = caps[2].parse().expect("matched \\d\\d");
    let minutes: i32 = caps[3].parse().expect("matched \\d\\d");
    let total = hours * 3600 + minutes * 60;
    let signed = if &caps[1] == "-" { -total } else { total };

    FixedOffset::east_opt(signed).ok_or_else(|| AppError::InvalidTimezone(s.to_string()))
}

/// Parse an RFC3339 instant and normalize it to UTC.
pub fn parse_instant(s: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| AppError::InvalidDate(s.to_string()))
}

/// Time-of-day component of an instant in the configured fixed timezone.
/// Admission checks compare only this component, never the full instant.
pub fn local_time_of_day(now: DateTime<Utc>, offset: FixedOffset) -> NaiveTime {
    now.with_timezone(&offset).time()
}

/// Format an instant for display in the configured fixed timezone.
pub fn format_instant(dt: DateTime<Utc>, offset: FixedOffset) -> String {
    dt.with_timezone(&offset).format("%Y-%m-%d %H:%M").to_string()
}
