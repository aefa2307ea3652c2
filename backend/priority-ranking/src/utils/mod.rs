// Utility functions for priority-ranking

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Offset-carrying layouts RFC 3339 rejects: minute precision, `Z` or short
/// `+00` offsets, and the space-separated form Postgres prints.
const OFFSET_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M%#z",
];

/// Layouts the feed source emits without an offset; read as UTC.
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a post timestamp.
///
/// Accepts RFC 3339 (`2026-02-19T12:00:00Z`, `+08:00` offsets, fractional
/// seconds), the looser ISO 8601 forms a browser `Date` takes (minute
/// precision, `+00` offsets, a space instead of `T`), offset-less date-times
/// and bare `YYYY-MM-DD` dates, the last two read as UTC. Returns `None` for
/// anything else, including blank input.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(ts) = DateTime::parse_from_str(raw, format) {
            return Some(ts.with_timezone(&Utc));
        }
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Hours elapsed from `then` to `now`, clamped at zero for future timestamps
pub fn elapsed_hours(then: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let millis = (now - then).num_milliseconds() as f64;
    (millis / MILLIS_PER_HOUR).max(0.0)
}
