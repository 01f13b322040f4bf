//! KML output for the location history converter.

pub mod writer;

pub use writer::{render_kml, write_kml};
