//! `sitegrid-exporter` -- batch export of hazard grid reports.
//!
//! Reads one `<prefix>_<code>.csv` source per hazard, classifies every
//! reading into a severity band and writes the `.RAF`, `.DAT` and `.RPT`
//! artifacts into the export directory. The run report is printed to
//! stdout as JSON; logs go to stderr.
//!
//! # Environment variables
//!
//! | Variable                 | Required | Default   | Description                                 |
//! |--------------------------|----------|-----------|---------------------------------------------|
//! | `SOURCE_DIR`             | no       | `.`       | Directory holding the source files          |
//! | `SOURCE_PREFIX`          | no       | `Ians_W7` | Filename prefix for sources and artifacts   |
//! | `EXPORT_DIR`             | no       | `export`  | Artifact directory, created if absent       |
//! | `HAZARD_PROFILES`        | no       | --        | JSON file replacing the built-in thresholds |
//! | `SOURCE_OVERRIDE_<CODE>` | no       | --        | Explicit source file for one hazard         |
//! | `LOG_FILE`               | no       | --        | Also write logs to this file                |
//! | `LOG_FILE_MODE`          | no       | `append`  | `append` or `truncate`                      |

use std::process::ExitCode;

use sitegrid_exporter::config::ExporterConfig;
use sitegrid_exporter::{logging, runner};

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let config = match ExporterConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e:#}");
            return ExitCode::from(runner::EXIT_STARTUP);
        }
    };

    if let Err(e) = logging::init(&config) {
        eprintln!("Failed to initialise logging: {e:#}");
        return ExitCode::from(runner::EXIT_STARTUP);
    }

    let report = match runner::execute(&config) {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "Export aborted");
            return ExitCode::from(runner::EXIT_STARTUP);
        }
    };

    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::error!(error = %e, "Failed to serialise export report"),
    }

    ExitCode::from(runner::exit_code(&report))
}
