use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use bikeshare_data::reader::find_missing_sources;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a level name from the CLI to a tracing directive.
///
/// Unknown names pass through lowercased so that full `EnvFilter`
/// directives still work.
pub fn level_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        _ => log_level.to_lowercase(),
    }
}

/// Build the filter for `log_level`, falling back to `warn`.
pub fn build_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_new(level_directive(log_level)).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Initialise the global `tracing` subscriber.
///
/// Logs go to stderr, or are appended to `log_file` when one is given so
/// that they never interleave with the interactive dialogue.
pub fn setup_logging(log_level: &str, log_file: Option<&Path>) -> anyhow::Result<()> {
    let registry = tracing_subscriber::registry().with(build_filter(log_level));

    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            registry.with(layer).try_init()?;
        }
        None => {
            let layer = fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr);
            registry.with(layer).try_init()?;
        }
    }

    Ok(())
}

// ── Data-directory check ───────────────────────────────────────────────────────

/// Warn about every city source missing from `data_dir`.
///
/// Missing sources are not fatal here; selecting such a city later fails
/// that load only.
pub fn check_data_dir(data_dir: &Path) -> Vec<PathBuf> {
    if !data_dir.is_dir() {
        tracing::warn!(path = %data_dir.display(), "data directory does not exist");
    }

    let missing = find_missing_sources(data_dir);
    for path in &missing {
        tracing::warn!(path = %path.display(), "city source file not found");
    }
    missing
}

// ── Tests ──────────────────────────────────────────────────────────────────────
