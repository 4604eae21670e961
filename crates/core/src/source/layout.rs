//! Where each hazard's source lives.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::SOURCE_EXTENSION;

/// Resolves the source path for a hazard code.
///
/// By default a hazard reads `<dir>/<prefix>_<code>.csv`. An explicit
/// override replaces that path for a single hazard, which is how an
/// operator points one pass at a hand-picked file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLayout {
    dir: PathBuf,
    prefix: String,
    overrides: HashMap<String, PathBuf>,
}

impl SourceLayout {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            overrides: HashMap::new(),
        }
    }

    /// Use `path` as the source for `code` instead of the conventional name.
    pub fn with_override(mut self, code: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.overrides.insert(code.into(), path.into());
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Conventional file name, e.g. `Ians_W7_SO2.csv`.
    pub fn file_name(&self, code: &str) -> String {
        format!("{}_{}.{}", self.prefix, code, SOURCE_EXTENSION)
    }

    pub fn path_for(&self, code: &str) -> PathBuf {
        match self.overrides.get(code) {
            Some(path) => path.clone(),
            None => self.dir.join(self.file_name(code)),
        }
    }

    pub fn is_overridden(&self, code: &str) -> bool {
        self.overrides.contains_key(code)
    }
}
