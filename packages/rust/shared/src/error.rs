//! Error types for adrindex.
//!
//! Library crates use [`AdrIndexError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all adrindex operations.
///
/// Every variant is fatal: the batch run stops at the first one.
#[derive(Debug, thiserror::Error)]
pub enum AdrIndexError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file stem does not split into at least two segments.
    #[error("invalid filename {stem:?} in {path:?}")]
    InvalidFilename { path: PathBuf, stem: String },

    /// The leading filename segment is not a positive integer.
    #[error("invalid file sequence {segment:?} in {path:?}")]
    InvalidSequence { path: PathBuf, segment: String },

    /// No `Date` row, or a date that resolves to the zero date.
    #[error("date is required in {path:?}")]
    MissingDate { path: PathBuf },

    /// `Date` row present but not in `DD-MM-YYYY` form.
    #[error("invalid date {value:?}, not DD-MM-YYYY, in {path:?}")]
    InvalidDate { path: PathBuf, value: String },

    #[error("authors is required in {path:?}")]
    MissingAuthors { path: PathBuf },

    /// `Status` is not one of the recognized values.
    #[error("invalid status {value:?}, must be one of: {valid} in {path:?}")]
    InvalidStatus {
        path: PathBuf,
        value: String,
        valid: String,
    },

    #[error("tags is required in {path:?}")]
    MissingTags { path: PathBuf },

    /// Two documents share a sequence number.
    #[error("duplicate index {sequence}, conflict between {second:?} and {first:?}")]
    DuplicateSequence {
        sequence: u64,
        first: PathBuf,
        second: PathBuf,
    },

    /// Layout parsing or rendering error.
    #[error("render error: {0}")]
    Render(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, AdrIndexError>;

impl AdrIndexError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Path of the document this error refers to, if any.
    ///
    /// For [`AdrIndexError::DuplicateSequence`] this is the later document.
    pub fn document_path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Io { path, .. }
            | Self::InvalidFilename { path, .. }
            | Self::InvalidSequence { path, .. }
            | Self::MissingDate { path }
            | Self::InvalidDate { path, .. }
            | Self::MissingAuthors { path }
            | Self::InvalidStatus { path, .. }
            | Self::MissingTags { path } => Some(path),
            Self::DuplicateSequence { second, .. } => Some(second),
            Self::Config { .. } | Self::Render(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = AdrIndexError::config("bad separator");
        assert_eq!(err.to_string(), "config error: bad separator");

        let err = AdrIndexError::InvalidStatus {
            path: "adr/3-x.adoc".into(),
            value: "Draft".into(),
            valid: "Approved, Partially Implemented, Implemented".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("\"Draft\""));
        assert!(msg.contains("Approved, Partially Implemented, Implemented"));
        assert!(msg.contains("3-x.adoc"));
    }

    #[test]
    fn duplicate_names_both_paths() {
        let err = AdrIndexError::DuplicateSequence {
            sequence: 1,
            first: "adr/1-a.adoc".into(),
            second: "adr/1-b.adoc".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("1-a.adoc"));
        assert!(msg.contains("1-b.adoc"));
        assert_eq!(
            err.document_path(),
            Some(std::path::Path::new("adr/1-b.adoc"))
        );
    }
}
