use serde_json::Value;

use crate::error::Result;
use crate::models::{EntryKind, Location, TimelineEntry};
use crate::time_utils::parse_timestamp;

// ── Optional field access ─────────────────────────────────────────────────────

/// Look up `key` on `value` and return it only if it is a JSON array.
pub fn get_array<'a>(value: &'a Value, key: &str) -> Option<&'a Vec<Value>> {
    value.get(key).and_then(Value::as_array)
}

/// Look up `key` on `value` and return it only if it is a JSON string.
pub fn get_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

/// Look up `key` on `value` and return it only if it is an integer.
///
/// Float-valued coordinates are truncated, matching how integer division of
/// an E7 value would treat them.
pub fn get_i64(value: &Value, key: &str) -> Option<i64> {
    let v = value.get(key)?;
    v.as_i64().or_else(|| v.as_f64().map(|f| f as i64))
}

// ── LocationExtractor ─────────────────────────────────────────────────────────

/// Reads `location`, `startLocation` and `endLocation` objects.
pub struct LocationExtractor;

impl LocationExtractor {
    /// Extract the location stored under `key`.
    ///
    /// Returns `None` unless the object carries both `latitudeE7` and
    /// `longitudeE7`.
    pub fn extract(value: &Value, key: &str) -> Option<Location> {
        let loc = value.get(key)?;
        let latitude_e7 = get_i64(loc, "latitudeE7")?;
        let longitude_e7 = get_i64(loc, "longitudeE7")?;
        let address = get_str(loc, "address").map(str::to_string);
        Some(Location {
            latitude_e7,
            longitude_e7,
            address,
        })
    }
}

// ── EntryExtractor ────────────────────────────────────────────────────────────

/// Converts `activitySegment` / `placeVisit` objects into [`TimelineEntry`]s.
pub struct EntryExtractor;

impl EntryExtractor {
    /// JSON key for each entry kind, in inspection order.
    pub const KEYS: [(&'static str, EntryKind); 2] = [
        ("activitySegment", EntryKind::ActivitySegment),
        ("placeVisit", EntryKind::PlaceVisit),
    ];

    /// Build an entry from one timeline object body.
    ///
    /// * `Ok(None)` – no `duration`, or one of its timestamps is missing.
    /// * `Err(..)` – a timestamp is present but matches no accepted format.
    pub fn extract(kind: EntryKind, body: &Value) -> Result<Option<TimelineEntry>> {
        let Some(duration) = body.get("duration") else {
            return Ok(None);
        };
        let (Some(start_raw), Some(end_raw)) = (
            get_str(duration, "startTimestamp"),
            get_str(duration, "endTimestamp"),
        ) else {
            return Ok(None);
        };

        let start = parse_timestamp(start_raw)?;
        let end = parse_timestamp(end_raw)?;

        Ok(Some(TimelineEntry {
            kind,
            start_timestamp: start_raw.to_string(),
            end_timestamp: end_raw.to_string(),
            start,
            end,
            location: LocationExtractor::extract(body, "location"),
            start_location: LocationExtractor::extract(body, "startLocation"),
            end_location: LocationExtractor::extract(body, "endLocation"),
        }))
    }

    /// Every entry carried by one element of `timelineObjects`.
    ///
    /// An element normally holds one of the two keys; both are inspected
    /// independently.
    pub fn extract_all(element: &Value) -> Result<Vec<TimelineEntry>> {
        let mut entries = Vec::new();
        for (key, kind) in Self::KEYS {
            if let Some(body) = element.get(key) {
                if let Some(entry) = Self::extract(kind, body)? {
                    entries.push(entry);
                }
            }
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HistoryError;
    use serde_json::json;

    // ── accessors ─────────────────────────────────────────────────────────────

    #[test]
    fn test_get_str_and_array() {
        let v = json!({"a": "x", "b": [1, 2], "n": 5});
        assert_eq!(get_str(&v, "a"), Some("x"));
        assert!(get_str(&v, "n").is_none());
        assert!(get_str(&v, "missing").is_none());
        assert_eq!(get_array(&v, "b").map(Vec::len), Some(2));
        assert!(get_array(&v, "a").is_none());
    }

    #[test]
    fn test_get_i64_accepts_float() {
        let v = json!({"i": 525678900, "f": 525678900.0, "s": "525678900"});
        assert_eq!(get_i64(&v, "i"), Some(525_678_900));
        assert_eq!(get_i64(&v, "f"), Some(525_678_900));
        assert!(get_i64(&v, "s").is_none());
    }

    // ── LocationExtractor ─────────────────────────────────────────────────────

    #[test]
    fn test_extract_location_with_address() {
        let v = json!({"location": {"latitudeE7": 525678900, "longitudeE7": 134050000, "address": "Park"}});
        let loc = LocationExtractor::extract(&v, "location").unwrap();
        assert_eq!(loc.latitude(), 52.56789);
        assert_eq!(loc.address.as_deref(), Some("Park"));
    }

    #[test]
    fn test_extract_location_missing_longitude() {
        let v = json!({"location": {"latitudeE7": 525678900}});
        assert!(LocationExtractor::extract(&v, "location").is_none());
    }

    #[test]
    fn test_extract_location_absent() {
        let v = json!({"other": {}});
        assert!(LocationExtractor::extract(&v, "location").is_none());
    }

    // ── EntryExtractor ────────────────────────────────────────────────────────

    #[test]
    fn test_extract_place_visit() {
        let body = json!({
            "duration": {
                "startTimestamp": "2023-01-05T10:00:00.000Z",
                "endTimestamp": "2023-01-05T11:00:00.000Z"
            },
            "location": {"latitudeE7": 1, "longitudeE7": 2}
        });
        let entry = EntryExtractor::extract(EntryKind::PlaceVisit, &body)
            .unwrap()
            .unwrap();
        assert_eq!(entry.kind, EntryKind::PlaceVisit);
        assert_eq!(entry.start_timestamp, "2023-01-05T10:00:00.000Z");
        assert!(entry.start < entry.end);
        assert!(entry.location.is_some());
        assert!(entry.start_location.is_none());
    }

    #[test]
    fn test_extract_without_duration_is_skipped() {
        let body = json!({"location": {"latitudeE7": 1, "longitudeE7": 2}});
        assert!(EntryExtractor::extract(EntryKind::PlaceVisit, &body)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_extract_with_partial_duration_is_skipped() {
        let body = json!({"duration": {"startTimestamp": "2023-01-05T10:00:00.000Z"}});
        assert!(EntryExtractor::extract(EntryKind::ActivitySegment, &body)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_extract_malformed_timestamp_is_error() {
        let body = json!({"duration": {
            "startTimestamp": "gestern",
            "endTimestamp": "2023-01-05T11:00:00.000Z"
        }});
        let err = EntryExtractor::extract(EntryKind::PlaceVisit, &body).unwrap_err();
        assert!(matches!(err, HistoryError::MalformedTimestamp(_)));
    }

    #[test]
    fn test_extract_all_reads_both_keys() {
        let duration = json!({
            "startTimestamp": "2023-01-05T10:00:00.000Z",
            "endTimestamp": "2023-01-05T11:00:00.000Z"
        });
        let element = json!({
            "activitySegment": {"duration": duration.clone()},
            "placeVisit": {"duration": duration}
        });
        let entries = EntryExtractor::extract_all(&element).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, EntryKind::ActivitySegment);
        assert_eq!(entries[1].kind, EntryKind::PlaceVisit);
    }

    #[test]
    fn test_extract_all_unknown_element() {
        let element = json!({"somethingElse": {}});
        assert!(EntryExtractor::extract_all(&element).unwrap().is_empty());
    }
}
