//! Time utilities: parsing stamp times, formatting instants and durations.

use crate::errors::{AppError, AppResult};
use chrono::{
    DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc,
};
use std::fmt::Write;

fn local_to_utc(naive: NaiveDateTime, raw: &str) -> AppResult<DateTime<Utc>> {
    Local
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| AppError::InvalidTime(format!("{} (ambiguous or skipped local time)", raw)))
}

/// Parse a stamp time given on the command line, relative to `now`.
///
/// Accepted forms:
/// - `now`
/// - RFC 3339 (`2025-09-01T08:00:00+02:00`, `2025-09-01T06:00:00Z`)
/// - local `YYYY-MM-DD HH:MM[:SS]`
/// - local `HH:MM[:SS]` on the current day
pub fn parse_stamp_time(raw: &str, now: DateTime<Utc>) -> AppResult<DateTime<Utc>> {
    let s = raw.trim();

    if s.eq_ignore_ascii_case("now") {
        return Ok(now);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return local_to_utc(naive, raw);
        }
    }

    for fmt in ["%H:%M", "%H:%M:%S"] {
        if let Ok(t) = NaiveTime::parse_from_str(s, fmt) {
            let today: NaiveDate = now.with_timezone(&Local).date_naive();
            return local_to_utc(today.and_time(t), raw);
        }
    }

    Err(AppError::InvalidTime(raw.to_string()))
}

/// Render `t` in local time; an invalid `fmt` falls back to RFC 3339.
pub fn to_local_string(t: &DateTime<Utc>, fmt: &str) -> String {
    let local = t.with_timezone(&Local);
    let mut out = String::new();
    match write!(out, "{}", local.format(fmt)) {
        Ok(()) => out,
        Err(_) => local.to_rfc3339_opts(SecondsFormat::Secs, false),
    }
}

/// `7h 30m` style rendering; negative durations get a leading `-`.
pub fn format_duration(d: &Duration) -> String {
    let total_minutes = d.num_minutes();
    let sign = if total_minutes < 0 { "-" } else { "" };
    let m = total_minutes.abs();
    format!("{}{:02}h {:02}m", sign, m / 60, m % 60)
}
