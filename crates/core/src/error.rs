use std::path::PathBuf;

/// Every failure the classification and export engine can report.
///
/// Source errors abort the pass for one hazard only; write errors are
/// scoped to a single artifact.
#[derive(Debug, thiserror::Error)]
pub enum HazardError {
    #[error("Source unreadable: {path}: {source}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Source too short: {path} has {line_count} line(s), at least 3 required")]
    SourceTooShort { path: PathBuf, line_count: usize },

    #[error("Malformed row in {path} at line {line}: expected {expected} field(s), found {found}")]
    MalformedRow {
        path: PathBuf,
        /// 1-indexed physical line number.
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Non-numeric reading in {path} at line {line}, column {column}: {value:?}")]
    NonNumericReading {
        path: PathBuf,
        /// 1-indexed physical line number.
        line: usize,
        /// 1-indexed field position.
        column: usize,
        value: String,
    },

    #[error("Export directory unavailable: {path}: {source}")]
    ExportDirectoryUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Artifact write failed: {path}: {source}")]
    ArtifactWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid hazard profile: {0}")]
    InvalidProfile(String),

    #[error("Profile file unreadable: {path}: {reason}")]
    ProfileFileUnreadable { path: PathBuf, reason: String },
}
