use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

use crate::time_utils::parse_date;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Convert a location history export into a KML file for a date range
#[derive(Parser, Debug, Clone)]
#[command(
    name = "location-history",
    about = "Convert a location history export into a KML file for a date range",
    version
)]
pub struct Settings {
    /// Directory directly above the year folders
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// First day of the range (YYYY-MM-DD); prompted for when omitted
    #[arg(long, value_parser = parse_date_arg)]
    pub start: Option<NaiveDate>,

    /// Last day of the range (YYYY-MM-DD); prompted for when omitted
    #[arg(long, value_parser = parse_date_arg)]
    pub end: Option<NaiveDate>,

    /// Add route lines between segment start and end locations
    #[arg(long, conflicts_with = "no_lines")]
    pub lines: bool,

    /// Do not add route lines
    #[arg(long)]
    pub no_lines: bool,

    /// Directory the KML file is written to
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os().collect())
    }

    /// Same as [`Settings::load`] but with an explicit argument list.
    pub fn load_from_args(args: Vec<std::ffi::OsString>) -> Self {
        let mut settings = Settings::parse_from(args);

        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }

        settings
    }

    /// Line toggle from the command line, `None` when neither flag was given.
    pub fn include_lines(&self) -> Option<bool> {
        match (self.lines, self.no_lines) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).map_err(|e| e.to_string())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn load(args: &[&str]) -> Settings {
        Settings::load_from_args(args.iter().map(|a| a.into()).collect())
    }

    #[test]
    fn test_settings_default_values() {
        let settings = Settings::parse_from(["location-history"]);

        assert_eq!(settings.root, PathBuf::from("."));
        assert!(settings.start.is_none());
        assert!(settings.end.is_none());
        assert!(settings.include_lines().is_none());
        assert_eq!(settings.output_dir, PathBuf::from("."));
        assert_eq!(settings.log_level, "INFO");
        assert!(!settings.debug);
    }

    #[test]
    fn test_settings_cli_dates() {
        let settings = load(&[
            "location-history",
            "--start",
            "2023-01-01",
            "--end",
            "2023-01-31",
        ]);
        assert_eq!(settings.start, NaiveDate::from_ymd_opt(2023, 1, 1));
        assert_eq!(settings.end, NaiveDate::from_ymd_opt(2023, 1, 31));
    }

    #[test]
    fn test_settings_cli_rejects_bad_date() {
        let result = Settings::try_parse_from(["location-history", "--start", "01.01.2023"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_cli_line_flags() {
        assert_eq!(load(&["location-history", "--lines"]).include_lines(), Some(true));
        assert_eq!(
            load(&["location-history", "--no-lines"]).include_lines(),
            Some(false)
        );
    }

    #[test]
    fn test_settings_cli_line_flags_conflict() {
        let result = Settings::try_parse_from(["location-history", "--lines", "--no-lines"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_cli_paths() {
        let settings = load(&[
            "location-history",
            "--root",
            "/data/Takeout/Semantic Location History",
            "--output-dir",
            "/tmp/out",
        ]);
        assert_eq!(
            settings.root,
            PathBuf::from("/data/Takeout/Semantic Location History")
        );
        assert_eq!(settings.output_dir, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_debug_overrides_log_level() {
        let settings = load(&["location-history", "--log-level", "ERROR", "--debug"]);
        assert_eq!(settings.log_level, "DEBUG");
    }
}
