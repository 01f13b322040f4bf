//! Core types for the location history converter.
//!
//! Holds the error type, the timeline and output data model, timestamp
//! parsing, JSON field accessors, output formatting helpers and the
//! command-line settings.

pub mod data_processors;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{HistoryError, Result};
