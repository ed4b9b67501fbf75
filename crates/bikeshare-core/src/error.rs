use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the bikeshare explorer.
#[derive(Error, Debug)]
pub enum BikeshareError {
    /// A city source file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV row or header in a city source could not be decoded.
    #[error("Failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A city source lacks one of the columns every source must carry.
    #[error("Column \"{column}\" missing from {path}")]
    MissingColumn { path: PathBuf, column: String },

    /// A timestamp string did not match any recognised format.
    #[error("Invalid timestamp format: {0}")]
    TimestampParse(String),

    /// A filter value is not a member of its allowed set.
    #[error("Invalid {kind} selection: {value}")]
    InvalidSelection { kind: &'static str, value: String },

    /// The user typed the exit keyword. Callers unwind and exit cleanly.
    #[error("Session ended by user")]
    Aborted,

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BikeshareError {
    /// `true` for the deliberate exit request, which is not a failure.
    pub fn is_abort(&self) -> bool {
        matches!(self, BikeshareError::Aborted)
    }
}

/// Convenience alias used throughout the bikeshare crates.
pub type Result<T> = std::result::Result<T, BikeshareError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = BikeshareError::FileRead {
            path: PathBuf::from("/data/chicago.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/data/chicago.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_missing_column() {
        let err = BikeshareError::MissingColumn {
            path: PathBuf::from("washington.csv"),
            column: "Start Time".to_string(),
        };
        assert_eq!(err.to_string(), "Column \"Start Time\" missing from washington.csv");
    }

    #[test]
    fn test_error_display_timestamp_parse() {
        let err = BikeshareError::TimestampParse("not-a-timestamp".to_string());
        assert_eq!(err.to_string(), "Invalid timestamp format: not-a-timestamp");
    }

    #[test]
    fn test_error_display_invalid_selection() {
        let err = BikeshareError::InvalidSelection {
            kind: "month",
            value: "july".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid month selection: july");
    }

    #[test]
    fn test_is_abort() {
        assert!(BikeshareError::Aborted.is_abort());
        assert!(!BikeshareError::TimestampParse(String::new()).is_abort());
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: BikeshareError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }
}
