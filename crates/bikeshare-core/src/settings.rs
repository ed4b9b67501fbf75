use clap::Parser;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::registry::City;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Interactive explorer for US bikeshare trip data
#[derive(Parser, Debug, Clone)]
#[command(
    name = "bikeshare",
    about = "Interactive explorer for US bikeshare trip data",
    version
)]
pub struct Settings {
    /// Directory holding chicago.csv, new_york_city.csv and washington.csv
    #[arg(long, env = "BIKESHARE_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path (logs go to stderr when absent)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Keep previous output on screen instead of clearing between views
    #[arg(long)]
    pub no_clear: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments and apply overrides.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os().collect())
    }

    /// Same as [`Settings::load`] but accepts an explicit argument list,
    /// enabling unit-testing without spawning subprocesses.
    pub fn load_from_args(args: Vec<OsString>) -> Self {
        Self::resolve(Settings::parse_from(args))
    }

    /// `--debug` overrides the log level.
    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Whether views should clear the terminal first.
    pub fn clear_screen(&self) -> bool {
        !self.no_clear
    }
}

/// Full path of a city's source file under `data_dir`.
pub fn source_path(data_dir: &Path, city: City) -> PathBuf {
    data_dir.join(city.file_name())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<OsString> {
        std::iter::once("bikeshare")
            .chain(list.iter().copied())
            .map(OsString::from)
            .collect()
    }

    #[test]
    fn test_defaults() {
        let s = Settings::load_from_args(args(&["--data-dir", "."]));
        assert_eq!(s.data_dir, PathBuf::from("."));
        assert_eq!(s.log_level, "WARNING");
        assert!(s.log_file.is_none());
        assert!(s.clear_screen());
    }

    #[test]
    fn test_debug_overrides_log_level() {
        let s = Settings::load_from_args(args(&["--log-level", "ERROR", "--debug"]));
        assert_eq!(s.log_level, "DEBUG");
    }

    #[test]
    fn test_explicit_options() {
        let s = Settings::load_from_args(args(&[
            "--data-dir",
            "/srv/bikeshare",
            "--log-file",
            "/tmp/bikeshare.log",
            "--no-clear",
        ]));
        assert_eq!(s.data_dir, PathBuf::from("/srv/bikeshare"));
        assert_eq!(s.log_file, Some(PathBuf::from("/tmp/bikeshare.log")));
        assert!(!s.clear_screen());
    }

    #[test]
    fn test_invalid_log_level_is_rejected() {
        let result = Settings::try_parse_from(args(&["--log-level", "LOUD"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_source_path() {
        let s = Settings::load_from_args(args(&["--data-dir", "/data"]));
        assert_eq!(
            source_path(&s.data_dir, City::NewYorkCity),
            PathBuf::from("/data/new_york_city.csv")
        );
    }
}
