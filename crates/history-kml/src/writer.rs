//! KML 2.2 serialization of an [`OutputDocument`].

use std::path::{Path, PathBuf};

use history_core::error::{HistoryError, Result};
use history_core::formatting::{format_coordinate, output_file_name};
use history_core::models::{Geometry, LineStyle, OutputDocument, Placemark};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use tracing::{debug, info};

const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";

type XmlWriter = Writer<Vec<u8>>;

// ── Public API ────────────────────────────────────────────────────────────────

/// Render `doc` as a complete KML document.
pub fn render_kml(doc: &OutputDocument) -> Result<String> {
    let mut w = Writer::new_with_indent(Vec::new(), b' ', 2);

    w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_error)?;
    w.write_event(Event::Start(
        BytesStart::new("kml").with_attributes([("xmlns", KML_NAMESPACE)]),
    ))
    .map_err(xml_error)?;
    start(&mut w, "Document")?;
    let title = output_file_name(&doc.range);
    text_element(&mut w, "name", title.trim_end_matches(".kml"))?;

    for placemark in &doc.placemarks {
        write_placemark(&mut w, placemark)?;
    }

    end(&mut w, "Document")?;
    end(&mut w, "kml")?;

    let mut bytes = w.into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes).map_err(xml_error)
}

/// Render `doc` and write it to `dir`, named after its date range.
///
/// The document is rendered completely before the file is created.
pub fn write_kml(doc: &OutputDocument, dir: &Path) -> Result<PathBuf> {
    let content = render_kml(doc)?;
    let path = dir.join(output_file_name(&doc.range));
    std::fs::write(&path, content).map_err(|source| HistoryError::FileWrite {
        path: path.clone(),
        source,
    })?;

    info!(
        "Wrote {} placemarks to {}",
        doc.placemarks.len(),
        path.display()
    );
    Ok(path)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn write_placemark(w: &mut XmlWriter, placemark: &Placemark) -> Result<()> {
    start(w, "Placemark")?;
    text_element(w, "name", &placemark.name)?;
    text_element(w, "description", &placemark.description)?;

    match &placemark.geometry {
        Geometry::Point { coordinate, when } => {
            start(w, "TimeStamp")?;
            text_element(w, "when", when)?;
            end(w, "TimeStamp")?;

            start(w, "Point")?;
            text_element(w, "coordinates", &format_coordinate(coordinate))?;
            end(w, "Point")?;
        }
        Geometry::Line { from, to, style } => {
            write_line_style(w, style)?;

            start(w, "LineString")?;
            let coords = format!("{} {}", format_coordinate(from), format_coordinate(to));
            text_element(w, "coordinates", &coords)?;
            end(w, "LineString")?;
        }
    }

    end(w, "Placemark")?;
    debug!("Placemark \"{}\" written", placemark.name);
    Ok(())
}

fn write_line_style(w: &mut XmlWriter, style: &LineStyle) -> Result<()> {
    start(w, "Style")?;
    start(w, "LineStyle")?;
    text_element(w, "color", &style.color)?;
    text_element(w, "width", &style.width.to_string())?;
    end(w, "LineStyle")?;
    end(w, "Style")
}

fn start(w: &mut XmlWriter, tag: &str) -> Result<()> {
    w.write_event(Event::Start(BytesStart::new(tag)))
        .map_err(xml_error)
}

fn end(w: &mut XmlWriter, tag: &str) -> Result<()> {
    w.write_event(Event::End(BytesEnd::new(tag)))
        .map_err(xml_error)
}

/// `<tag>text</tag>` with `text` escaped.
fn text_element(w: &mut XmlWriter, tag: &str, text: &str) -> Result<()> {
    start(w, tag)?;
    w.write_event(Event::Text(BytesText::new(text)))
        .map_err(xml_error)?;
    end(w, tag)
}

fn xml_error(e: impl std::fmt::Display) -> HistoryError {
    HistoryError::Xml(e.to_string())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
