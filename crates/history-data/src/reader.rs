//! Month file discovery and filtering.
//!
//! Walks `<root>/<YYYY>/*.json` and turns every `activitySegment` /
//! `placeVisit` overlapping the requested range into a [`TimelineEntry`].

use std::path::{Path, PathBuf};

use history_core::data_processors::{get_array, EntryExtractor};
use history_core::error::{HistoryError, Result};
use history_core::models::{DateRange, TimelineEntry};
use history_core::time_utils::is_year_token;
use tracing::{debug, info};
use walkdir::WalkDir;

// ── Public API ────────────────────────────────────────────────────────────────

/// Fail with [`HistoryError::InputLayout`] unless `root` has at least one
/// direct child directory named like a year.
pub fn ensure_year_layout(root: &Path) -> Result<()> {
    if !root.is_dir() || year_dirs(root)?.is_empty() {
        return Err(HistoryError::InputLayout(root.to_path_buf()));
    }
    Ok(())
}

/// All month files under `root`, in scan order.
///
/// Year folders are visited in ascending lexical order, then the `.json`
/// files directly inside each, also ascending. Non-year folders are ignored.
pub fn find_month_files(root: &Path) -> Result<Vec<PathBuf>> {
    ensure_year_layout(root)?;

    let mut files = Vec::new();
    for year in year_dirs(root)? {
        files.extend(
            children(&year)?
                .into_iter()
                .filter(|entry| {
                    entry.file_type().is_file()
                        && entry
                            .path()
                            .extension()
                            .map(|ext| ext == "json")
                            .unwrap_or(false)
                })
                .map(|entry| entry.into_path()),
        );
    }

    Ok(files)
}

/// Load one month file and keep the entries overlapping `range`.
///
/// A file without `timelineObjects` yields nothing. Entries lacking a
/// complete `duration` are skipped; unreadable files, invalid JSON and
/// malformed timestamps are errors.
pub fn filter_file(path: &Path, range: &DateRange) -> Result<Vec<TimelineEntry>> {
    info!("Verarbeite: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|source| HistoryError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let data: serde_json::Value = serde_json::from_str(&content)?;

    let Some(objects) = get_array(&data, "timelineObjects") else {
        debug!("File {}: no timelineObjects", path.display());
        return Ok(Vec::new());
    };

    let mut matched = Vec::new();
    let mut entries_read = 0usize;
    for element in objects {
        for entry in EntryExtractor::extract_all(element)? {
            entries_read += 1;
            if range.overlaps(entry.start, entry.end) {
                matched.push(entry);
            }
        }
    }

    debug!(
        "File {}: {} objects, {} entries read, {} in range",
        path.display(),
        objects.len(),
        entries_read,
        matched.len(),
    );

    Ok(matched)
}

/// Scan every month file under `root` and collect the matching entries.
///
/// The result is in scan order; see [`crate::aggregator`] for sorting.
pub fn load_entries(root: &Path, range: &DateRange) -> Result<Vec<TimelineEntry>> {
    let files = find_month_files(root)?;

    let mut all_entries: Vec<TimelineEntry> = Vec::new();
    for file_path in &files {
        all_entries.extend(filter_file(file_path, range)?);
    }

    debug!(
        "Collected {} entries from {} files",
        all_entries.len(),
        files.len()
    );

    Ok(all_entries)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Direct children of `dir`, sorted by file name.
///
/// Any entry the walk cannot stat (a dangling symlink, a link loop, an
/// unreadable folder) is a [`HistoryError::FileRead`] for that path.
fn children(dir: &Path) -> Result<Vec<walkdir::DirEntry>> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| entry.map_err(|err| walk_error(dir, err)))
        .collect()
}

fn walk_error(dir: &Path, err: walkdir::Error) -> HistoryError {
    let path = err.path().unwrap_or(dir).to_path_buf();
    HistoryError::FileRead {
        path,
        source: std::io::Error::from(err),
    }
}

/// Year-named child directories of `root`, sorted.
fn year_dirs(root: &Path) -> Result<Vec<PathBuf>> {
    let dirs = children(root)?
        .into_iter()
        .filter(|entry| {
            entry.file_type().is_dir()
                && entry
                    .file_name()
                    .to_str()
                    .map(is_year_token)
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();
    Ok(dirs)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
