use std::path::PathBuf;
use thiserror::Error;

/// All errors produced while converting a location history export.
#[derive(Error, Debug)]
pub enum HistoryError {
    /// A month file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output file could not be created or written.
    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A month file is not valid JSON.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A timestamp string matched neither accepted format.
    #[error("Malformed timestamp: {0}")]
    MalformedTimestamp(String),

    /// An operator-supplied date is not in `YYYY-MM-DD` form.
    #[error("Invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),

    /// The root directory has no year-named (`YYYY`) subfolders.
    #[error(
        "Jahresordner nicht gefunden in {0}. Bitte wechseln Sie in das Verzeichnis, \
         das direkt oberhalb der Jahresordner liegt."
    )]
    InputLayout(PathBuf),

    /// The KML document could not be serialized.
    #[error("Failed to write KML: {0}")]
    Xml(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the history crates.
pub type Result<T> = std::result::Result<T, HistoryError>;
