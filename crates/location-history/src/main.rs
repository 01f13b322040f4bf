mod bootstrap;
mod prompt;

use anyhow::Result;
use history_core::error::HistoryError;
use history_core::settings::Settings;
use history_data::analysis::generate;
use history_kml::writer::write_kml;

use crate::prompt::Prompter;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("Location History v{} starting", env!("CARGO_PKG_VERSION"));

    let stdin = std::io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), std::io::stdout());
    let request = prompter.resolve(&settings)?;

    tracing::info!(
        "Root: {}, range: {} .. {}, lines: {}",
        settings.root.display(),
        request.range.start_date,
        request.range.end_date,
        request.include_lines
    );

    let doc = match generate(&settings.root, &request.range, request.include_lines) {
        Ok(doc) => doc,
        Err(err) => match exit_code(&err) {
            Some(code) => {
                eprintln!("{}", err);
                std::process::exit(code);
            }
            None => return Err(err.into()),
        },
    };

    let path = write_kml(&doc, &settings.output_dir)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    println!("KML-Datei {} erfolgreich erstellt.", name);

    Ok(())
}

/// Errors that end the run with a plain message and a fixed status instead of
/// propagating out of `main`.
fn exit_code(err: &HistoryError) -> Option<i32> {
    match err {
        HistoryError::InputLayout(_) => Some(1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use history_core::models::DateRange;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_exit_code_input_layout_is_one() {
        let err = HistoryError::InputLayout(PathBuf::from("/tmp/export"));
        assert_eq!(exit_code(&err), Some(1));
    }

    #[test]
    fn test_exit_code_other_errors_propagate() {
        let malformed = HistoryError::MalformedTimestamp("yesterday".to_string());
        assert_eq!(exit_code(&malformed), None);

        let unreadable = file_read_error();
        assert_eq!(exit_code(&unreadable), None);
    }

    #[test]
    fn test_exit_code_for_export_without_year_folders() {
        let export = TempDir::new().unwrap();
        std::fs::create_dir(export.path().join("Takeout")).unwrap();
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 1, 31).unwrap(),
        );

        let err = generate(export.path(), &range, false).unwrap_err();
        assert_eq!(exit_code(&err), Some(1));
    }

    fn file_read_error() -> HistoryError {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        HistoryError::FileRead {
            path: PathBuf::from("/export/2023/01.json"),
            source: io_err,
        }
    }
}
