//! Main conversion pipeline.
//!
//! Scans the export, sorts the matches and emits placemarks, returning an
//! [`OutputDocument`] ready for the KML writer. Nothing is written here.

use std::path::Path;

use history_core::error::Result;
use history_core::models::{DateRange, OutputDocument};
use tracing::{info, warn};

use crate::aggregator::{sort_chronologically, summarize};
use crate::emitter::emit;
use crate::reader::load_entries;

/// Run the full pipeline.
///
/// 1. Validate the year-folder layout under `root`.
/// 2. Filter every month file against `range`.
/// 3. Sort the matches by start time (stable).
/// 4. Emit points, and lines when `include_lines` is set.
pub fn generate(root: &Path, range: &DateRange, include_lines: bool) -> Result<OutputDocument> {
    if range.is_inverted() {
        warn!(
            "Start date {} is after end date {}; no entries can match",
            range.start_date, range.end_date
        );
    }

    // ── Step 1 + 2: Scan ──────────────────────────────────────────────────────
    let load_start = std::time::Instant::now();
    let mut entries = load_entries(root, range)?;
    let load_time = load_start.elapsed().as_secs_f64();

    // ── Step 3: Sort ──────────────────────────────────────────────────────────
    sort_chronologically(&mut entries);

    let summary = summarize(&entries);
    info!(
        "{} entries in range ({} visits, {} segments, span {}), loaded in {:.2}s",
        summary.total(),
        summary.place_visits,
        summary.activity_segments,
        summary.span_label(),
        load_time
    );

    // ── Step 4: Emit ──────────────────────────────────────────────────────────
    let mut doc = OutputDocument::new(*range);
    emit(&mut doc, &entries, include_lines);

    Ok(doc)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
