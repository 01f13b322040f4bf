//! Turns sorted timeline entries into KML placemarks.

use history_core::formatting::{route_label, visit_description};
use history_core::models::{
    Geometry, LineStyle, OutputDocument, Placemark, TimelineEntry, UNKNOWN_ADDRESS,
};

/// Point placemark for an entry with a `location`, if it has one.
pub fn point_for(entry: &TimelineEntry) -> Option<Placemark> {
    let location = entry.location.as_ref()?;
    Some(Placemark {
        name: location
            .address
            .clone()
            .unwrap_or_else(|| UNKNOWN_ADDRESS.to_string()),
        description: visit_description(&entry.start_timestamp, &entry.end_timestamp),
        geometry: Geometry::Point {
            coordinate: location.coordinate(),
            when: entry.start_timestamp.clone(),
        },
    })
}

/// Route line from `startLocation` to `endLocation`, if both are present.
pub fn line_for(entry: &TimelineEntry) -> Option<Placemark> {
    let (from, to) = (entry.start_location.as_ref()?, entry.end_location.as_ref()?);
    let label = route_label(&entry.start_timestamp, &entry.end_timestamp);
    Some(Placemark {
        name: label.clone(),
        description: label,
        geometry: Geometry::Line {
            from: from.coordinate(),
            to: to.coordinate(),
            style: LineStyle::route(),
        },
    })
}

/// Append the placemarks of every entry to `doc`, in the given order.
///
/// Point and line are decided independently; an entry may produce either,
/// both or none.
pub fn emit(doc: &mut OutputDocument, entries: &[TimelineEntry], include_lines: bool) {
    for entry in entries {
        if let Some(point) = point_for(entry) {
            doc.placemarks.push(point);
        }
        if include_lines {
            if let Some(line) = line_for(entry) {
                doc.placemarks.push(line);
            }
        }
    }
}
