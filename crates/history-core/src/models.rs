use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::time_utils::start_of_day_utc;

/// Scale factor of the fixed-point `latitudeE7` / `longitudeE7` fields.
pub const E7_SCALE: f64 = 1e7;

/// Placemark name used when a visited location carries no address.
pub const UNKNOWN_ADDRESS: &str = "Unbekannte Adresse";

/// A latitude/longitude pair in fixed-point E7 form, as found in the export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude_e7: i64,
    pub longitude_e7: i64,
    /// Human-readable address, when the export has one.
    #[serde(default)]
    pub address: Option<String>,
}

impl Location {
    pub fn latitude(&self) -> f64 {
        self.latitude_e7 as f64 / E7_SCALE
    }

    pub fn longitude(&self) -> f64 {
        self.longitude_e7 as f64 / E7_SCALE
    }

    /// Coordinate in KML axis order (longitude first).
    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            longitude: self.longitude(),
            latitude: self.latitude(),
        }
    }
}

/// Which kind of timeline object an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryKind {
    /// Movement between two places (`activitySegment`).
    ActivitySegment,
    /// A stay at one place (`placeVisit`).
    PlaceVisit,
}

/// One `activitySegment` or `placeVisit` that passed the date filter.
///
/// The raw timestamp strings are kept verbatim because they are written to
/// the output as-is; the parsed instants drive filtering and ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub kind: EntryKind,
    pub start_timestamp: String,
    pub end_timestamp: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub start_location: Option<Location>,
    #[serde(default)]
    pub end_location: Option<Location>,
}

/// Inclusive time window requested by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DateRange {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// Lower bound: midnight UTC of the start date.
    pub fn start(&self) -> DateTime<Utc> {
        start_of_day_utc(self.start_date)
    }

    /// Upper bound: midnight UTC of the end date.
    pub fn end(&self) -> DateTime<Utc> {
        start_of_day_utc(self.end_date)
    }

    /// `true` when `[start, end]` touches the window; both edges inclusive.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start <= self.end() && end >= self.start()
    }

    pub fn is_inverted(&self) -> bool {
        self.start_date > self.end_date
    }
}

/// A single position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub longitude: f64,
    pub latitude: f64,
}

/// Visual style applied to route lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineStyle {
    /// KML colour in `aabbggrr` hex notation.
    pub color: String,
    pub width: u32,
}

impl LineStyle {
    /// Opaque blue, three units wide.
    pub fn route() -> Self {
        Self {
            color: "ffff0000".to_string(),
            width: 3,
        }
    }
}

/// Geometry carried by a placemark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Geometry {
    Point {
        coordinate: Coordinate,
        /// Raw start timestamp written to `<TimeStamp><when>`.
        when: String,
    },
    Line {
        from: Coordinate,
        to: Coordinate,
        style: LineStyle,
    },
}

/// One emitted placemark, derived from exactly one [`TimelineEntry`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placemark {
    pub name: String,
    pub description: String,
    pub geometry: Geometry,
}

impl Placemark {
    pub fn is_point(&self) -> bool {
        matches!(self.geometry, Geometry::Point { .. })
    }

    pub fn is_line(&self) -> bool {
        matches!(self.geometry, Geometry::Line { .. })
    }
}

/// Everything that ends up in the output file, in emission order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputDocument {
    pub range: DateRange,
    pub placemarks: Vec<Placemark>,
}

impl OutputDocument {
    pub fn new(range: DateRange) -> Self {
        Self {
            range,
            placemarks: Vec::new(),
        }
    }

    pub fn points(&self) -> impl Iterator<Item = &Placemark> {
        self.placemarks.iter().filter(|p| p.is_point())
    }

    pub fn lines(&self) -> impl Iterator<Item = &Placemark> {
        self.placemarks.iter().filter(|p| p.is_line())
    }
}
