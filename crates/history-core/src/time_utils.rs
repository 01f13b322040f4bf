use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use regex::Regex;

use crate::error::{HistoryError, Result};

/// Fractional-seconds UTC form, e.g. `2023-01-05T10:00:00.000Z`.
const UTC_FRACTIONAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// Numeric offset form, e.g. `2023-01-05T11:00:00+0100`.
const OFFSET_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// Operator-facing date form.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ── Timeline timestamps ───────────────────────────────────────────────────────

/// Parse a timeline timestamp into a UTC instant.
///
/// The fractional UTC form is tried first, then the offset form. Offsets
/// written with a colon (`+01:00`) are accepted through a final RFC 3339
/// attempt. Anything else is a [`HistoryError::MalformedTimestamp`].
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, UTC_FRACTIONAL_FORMAT) {
        return Ok(Utc.from_utc_datetime(&naive));
    }

    if let Ok(dt) = DateTime::parse_from_str(s, OFFSET_FORMAT) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    Err(HistoryError::MalformedTimestamp(s.to_string()))
}

// ── Operator dates ────────────────────────────────────────────────────────────

/// Parse a `YYYY-MM-DD` date as typed by the operator.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| HistoryError::InvalidDate(s.trim().to_string()))
}

/// Midnight UTC at the start of `date`.
pub fn start_of_day_utc(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

// ── Folder names ──────────────────────────────────────────────────────────────

/// `true` when `name` is a four-digit year token such as `"2023"`.
pub fn is_year_token(name: &str) -> bool {
    static YEAR_RE: OnceLock<Regex> = OnceLock::new();
    YEAR_RE
        .get_or_init(|| Regex::new(r"^[0-9]{4}$").expect("regex is valid"))
        .is_match(name)
}
