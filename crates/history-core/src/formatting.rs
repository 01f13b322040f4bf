use crate::models::{Coordinate, DateRange};
use crate::time_utils::DATE_FORMAT;

/// Name of the output file for `range`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use history_core::formatting::output_file_name;
/// use history_core::models::DateRange;
///
/// let range = DateRange::new(
///     NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2023, 1, 31).unwrap(),
/// );
/// assert_eq!(
///     output_file_name(&range),
///     "location_history_2023-01-01_bis_2023-01-31.kml"
/// );
/// ```
pub fn output_file_name(range: &DateRange) -> String {
    format!(
        "location_history_{}_bis_{}.kml",
        range.start_date.format(DATE_FORMAT),
        range.end_date.format(DATE_FORMAT)
    )
}

/// Description of a visited point: raw start and end timestamps.
pub fn visit_description(start: &str, end: &str) -> String {
    format!("Start: {}\nEnde: {}", start, end)
}

/// Name and description of a route line.
pub fn route_label(start: &str, end: &str) -> String {
    format!("Strecke von {} bis {}", start, end)
}

/// Render one coordinate as a KML tuple `lon,lat,0`.
///
/// # Examples
///
/// ```
/// use history_core::formatting::format_coordinate;
/// use history_core::models::Coordinate;
///
/// let c = Coordinate { longitude: 13.405, latitude: 52.56789 };
/// assert_eq!(format_coordinate(&c), "13.405,52.56789,0");
/// ```
pub fn format_coordinate(c: &Coordinate) -> String {
    format!("{},{},0", c.longitude, c.latitude)
}
