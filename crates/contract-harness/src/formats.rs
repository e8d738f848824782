//! String formats shared by schema shapes, comparison operators and sort checks.
//!
//! Timestamps are parsed with `time` rather than compared as text, so
//! `2020-01-01T00:00:00Z` and `2020-01-01T00:00:00.000Z` are the same instant and
//! offsets are honoured. Accepted forms, in order:
//!
//! - RFC 3339 date-time (`2020-01-07T02:19:00.000Z`, `2020-01-06T21:19:00-05:00`)
//! - ISO 8601 date-time without an offset, read as UTC (`2021-01-26T06:26:10.000000`)
//! - date only (`2010-12-08`)

use std::cmp::Ordering;
use time::format_description::well_known::{Iso8601, Rfc3339};
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime};
use url::Url;

/// Parses a date-time string into an instant.
pub fn parse_timestamp(value: &str) -> Option<OffsetDateTime> {
    if let Ok(instant) = OffsetDateTime::parse(value, &Rfc3339) {
        return Some(instant);
    }
    PrimitiveDateTime::parse(value, &Iso8601::DEFAULT)
        .ok()
        .map(PrimitiveDateTime::assume_utc)
}

/// Parses a date-only value (`YYYY-MM-DD`).
pub fn parse_date(value: &str) -> Option<Date> {
    let mut parts = value.split('-');
    let year: i32 = parts.next()?.parse().ok()?;
    let month: u8 = parts.next()?.parse().ok()?;
    let day: u8 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    let month = Month::try_from(month).ok()?;
    Date::from_calendar_date(year, month, day).ok()
}

/// Whether `value` is a valid date-time or date.
pub fn is_date_time(value: &str) -> bool {
    parse_timestamp(value).is_some() || parse_date(value).is_some()
}

/// Orders two temporal strings. `None` unless both sides parse as the same kind.
pub fn temporal_cmp(left: &str, right: &str) -> Option<Ordering> {
    if let (Some(left), Some(right)) = (parse_timestamp(left), parse_timestamp(right)) {
        return Some(left.cmp(&right));
    }
    let left = parse_date(left)?;
    let right = parse_date(right)?;
    Some(left.cmp(&right))
}

/// Orders two strings chronologically when both are temporal, lexicographically otherwise.
pub fn string_cmp(left: &str, right: &str) -> Ordering {
    temporal_cmp(left, right).unwrap_or_else(|| left.cmp(right))
}

/// Whether `value` is an absolute http(s) URL with a host.
pub fn is_http_url(value: &str) -> bool {
    Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host().is_some())
        .unwrap_or(false)
}
