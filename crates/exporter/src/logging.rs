//! Tracing subscriber setup.
//!
//! Console output always goes to stderr so stdout stays clean for the run
//! report. When a debug log file is configured, a second plain-text layer
//! mirrors every event into it.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{ExporterConfig, LogFileMode};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "sitegrid_exporter=info,sitegrid_core=info";

/// Install the global subscriber. Call once, from `main`.
pub fn init(config: &ExporterConfig) -> anyhow::Result<()> {
    let file_layer = match &config.log_file {
        Some(path) => {
            let file = open_log_file(path, config.log_file_mode)
                .with_context(|| format!("opening log file {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .init();

    Ok(())
}

/// Open the debug log, creating it if absent.
pub fn open_log_file(path: &Path, mode: LogFileMode) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.create(true);
    match mode {
        LogFileMode::Append => options.append(true),
        LogFileMode::Truncate => options.write(true).truncate(true),
    };
    options.open(path)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn append_keeps_previous_runs() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("DEBUG.LOG");
        std::fs::write(&path, "first run\n").expect("seed log");

        let mut file = open_log_file(&path, LogFileMode::Append).expect("open");
        writeln!(file, "second run").expect("write");
        drop(file);

        let log = std::fs::read_to_string(&path).expect("read log");
        assert_eq!(log, "first run\nsecond run\n");
    }

    #[test]
    fn truncate_starts_fresh() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("DEBUG.LOG");
        std::fs::write(&path, "stale entries\n").expect("seed log");

        let mut file = open_log_file(&path, LogFileMode::Truncate).expect("open");
        writeln!(file, "new").expect("write");
        drop(file);

        assert_eq!(std::fs::read_to_string(&path).expect("read log"), "new\n");
    }

    #[test]
    fn creates_missing_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("DEBUG.LOG");
        open_log_file(&path, LogFileMode::Append).expect("open");
        assert!(path.is_file());
    }
}
