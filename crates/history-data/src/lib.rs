//! Data layer of the location history converter.
//!
//! Responsible for discovering the year/month JSON files of an export,
//! filtering their timeline objects against a date range, ordering the
//! matches and turning them into placemarks.

pub mod aggregator;
pub mod analysis;
pub mod emitter;
pub mod reader;

pub use analysis::generate;
pub use history_core as core;
