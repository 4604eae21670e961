//! Persisting an [`ExportBundle`] as three artifacts.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::encoding::ExportBundle;
use crate::error::HazardError;

/// Default artifact directory, relative to the working directory.
pub const DEFAULT_EXPORT_DIR: &str = "export";

/// The three artifact kinds, in the order they are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Raf,
    Dat,
    Rpt,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 3] = [ArtifactKind::Raf, ArtifactKind::Dat, ArtifactKind::Rpt];

    /// Upper-case file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Raf => "RAF",
            Self::Dat => "DAT",
            Self::Rpt => "RPT",
        }
    }
}

/// Directory and file-name prefix that artifacts are written under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTarget {
    dir: PathBuf,
    prefix: String,
}

impl ExportTarget {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `<dir>/<prefix>_<code>.<EXT>`
    pub fn artifact_path(&self, code: &str, kind: ArtifactKind) -> PathBuf {
        self.dir
            .join(format!("{}_{}.{}", self.prefix, code, kind.extension()))
    }
}

/// Result of writing one bundle. Artifacts are attempted independently,
/// so some may be written while others failed.
#[derive(Debug, Default)]
pub struct WriteOutcome {
    pub written: Vec<PathBuf>,
    pub failures: Vec<HazardError>,
}

impl WriteOutcome {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Create the export directory (and parents) if absent.
pub fn ensure_export_dir(dir: &Path) -> Result<(), HazardError> {
    std::fs::create_dir_all(dir).map_err(|source| HazardError::ExportDirectoryUnavailable {
        path: dir.to_path_buf(),
        source,
    })
}

/// Write the RAF, DAT and RPT artifacts for `code`.
///
/// Every file is truncated and rewritten in full. Only an unavailable
/// export directory fails the call; a failed artifact is recorded in the
/// outcome and the remaining artifacts are still attempted.
pub fn write_bundle(
    target: &ExportTarget,
    code: &str,
    bundle: &ExportBundle,
) -> Result<WriteOutcome, HazardError> {
    ensure_export_dir(target.dir())?;

    let mut outcome = WriteOutcome::default();
    for kind in ArtifactKind::ALL {
        let path = target.artifact_path(code, kind);
        let contents = match kind {
            ArtifactKind::Raf => bundle.raf.clone(),
            ArtifactKind::Dat => line_content(&bundle.dat),
            ArtifactKind::Rpt => line_content(&bundle.rpt),
        };

        match std::fs::write(&path, contents) {
            Ok(()) => {
                tracing::debug!(hazard = %code, path = %path.display(), "Artifact written");
                outcome.written.push(path);
            }
            Err(source) => {
                tracing::warn!(
                    hazard = %code,
                    path = %path.display(),
                    error = %source,
                    "Artifact write failed",
                );
                outcome
                    .failures
                    .push(HazardError::ArtifactWriteFailed { path, source });
            }
        }
    }

    Ok(outcome)
}

/// Each line newline-terminated.
fn line_content(lines: &[String]) -> String {
    let mut out = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
