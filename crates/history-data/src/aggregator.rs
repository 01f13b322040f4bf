//! Chronological ordering and summary statistics of matched entries.

use chrono::{DateTime, SecondsFormat, Utc};
use history_core::models::{EntryKind, TimelineEntry};

// ── Sorting ───────────────────────────────────────────────────────────────────

/// Order entries by parsed start instant, ascending.
///
/// `sort_by_key` is stable, so entries starting at the same instant keep
/// their scan order.
pub fn sort_chronologically(entries: &mut [TimelineEntry]) {
    entries.sort_by_key(|e| e.start);
}

// ── ScanSummary ───────────────────────────────────────────────────────────────

/// Counts over the matched entries, logged once the scan is done.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanSummary {
    pub place_visits: usize,
    pub activity_segments: usize,
    /// Earliest start among the entries.
    pub first_start: Option<DateTime<Utc>>,
    /// Latest end among the entries.
    pub last_end: Option<DateTime<Utc>>,
}

impl ScanSummary {
    pub fn total(&self) -> usize {
        self.place_visits + self.activity_segments
    }

    /// `first_start .. last_end` in RFC 3339, or `-` when nothing matched.
    pub fn span_label(&self) -> String {
        match (self.first_start, self.last_end) {
            (Some(start), Some(end)) => format!(
                "{} .. {}",
                start.to_rfc3339_opts(SecondsFormat::Secs, true),
                end.to_rfc3339_opts(SecondsFormat::Secs, true)
            ),
            _ => "-".to_string(),
        }
    }
}

/// Summarize `entries`; order does not matter.
pub fn summarize(entries: &[TimelineEntry]) -> ScanSummary {
    let mut summary = ScanSummary::default();
    for entry in entries {
        match entry.kind {
            EntryKind::PlaceVisit => summary.place_visits += 1,
            EntryKind::ActivitySegment => summary.activity_segments += 1,
        }
        summary.first_start = Some(match summary.first_start {
            Some(s) => s.min(entry.start),
            None => entry.start,
        });
        summary.last_end = Some(match summary.last_end {
            Some(e) => e.max(entry.end),
            None => entry.end,
        });
    }
    summary
}

// ── Tests ─────────────────────────────────────────────────────────────────────
