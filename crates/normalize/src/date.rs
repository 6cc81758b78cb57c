//! Date parsing for the engine's four payload dialects.
//!
//! The two provider API versions and the two spreadsheet export dialects
//! each use a different textual date form; centralizing the parsing here is
//! what keeps the mappers free of ad hoc parsers. Recognized forms, tried in
//! order:
//!
//! 1. ISO-prefixed `YYYY-MM-DD...` — RFC 3339 first, then the naive
//!    datetime and bare-date variants.
//! 2. `DD/MM/YYYY`, optionally followed by ` HH:MM:SS` (missing time parts
//!    default to midnight).
//! 3. A generic day-first parse as last resort.
//!
//! Ambiguous numeric dates are always read day-first (Italian-locale
//! convention), never month-first. Unparseable or empty input yields `None`;
//! this function cannot fail.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Day-first formats tried as the last resort.
const GENERIC_DAY_FIRST: &[&str] = &["%d-%m-%Y", "%d.%m.%Y", "%d/%m/%y"];

fn instant_from_naive(naive: NaiveDateTime) -> DateTime<Utc> {
    DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc)
}

fn midnight(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0).map(instant_from_naive)
}

/// Converts any supported textual date into a canonical UTC instant.
///
/// Never panics; unparseable, empty, or absent input yields `None`.
///
/// ```
/// use normalize::parse_instant;
///
/// let iso = parse_instant(Some("2025-05-19T00:00:00Z")).unwrap();
/// let day_first = parse_instant(Some("19/05/2025")).unwrap();
/// assert_eq!(iso, day_first);
///
/// assert!(parse_instant(Some("not-a-date")).is_none());
/// assert!(parse_instant(None).is_none());
/// ```
pub fn parse_instant(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }

    // 1. ISO-prefixed YYYY-MM-DD...
    if looks_iso(raw) {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
                return Some(instant_from_naive(naive));
            }
        }
        if let Some(prefix) = raw.get(..10) {
            if let Ok(date) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
                return midnight(date);
            }
        }
    }

    // 2. DD/MM/YYYY with optional HH:MM:SS.
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%d/%m/%Y %H:%M:%S") {
        return Some(instant_from_naive(naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%d/%m/%Y") {
        return midnight(date);
    }

    // 3. Generic day-first last resort.
    for fmt in GENERIC_DAY_FIRST {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return midnight(date);
        }
    }

    None
}

/// Cheap shape check for the ISO family: `YYYY-MM-DD` prefix.
fn looks_iso(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() >= 10
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'-'
        && bytes[5].is_ascii_digit()
        && bytes[6].is_ascii_digit()
        && bytes[7] == b'-'
        && bytes[8].is_ascii_digit()
        && bytes[9].is_ascii_digit()
}
