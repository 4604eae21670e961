//! One export run: configuration in, report out.

use sitegrid_core::export::{run_export, ExportReport, HazardStatus};

use crate::config::ExporterConfig;

/// Every hazard exported all three artifacts.
pub const EXIT_OK: u8 = 0;
/// Startup failed before any hazard was processed.
pub const EXIT_STARTUP: u8 = 1;
/// At least one hazard was skipped, failed or partially written.
pub const EXIT_INCOMPLETE: u8 = 2;

/// Load the hazard registry, resolve paths and export every hazard.
///
/// Only configuration problems are returned as errors; per-hazard
/// failures are recorded in the report.
pub fn execute(config: &ExporterConfig) -> anyhow::Result<ExportReport> {
    let registry = config.load_registry()?;
    let settings = config.export_settings(&registry)?;

    tracing::info!(
        hazards = %registry.codes().join(","),
        source_dir = %config.source_dir.display(),
        export_dir = %config.export_dir.display(),
        "Starting export",
    );

    let report = run_export(&settings, &registry);

    tracing::info!(
        exported = report.count(HazardStatus::Exported),
        partial = report.count(HazardStatus::Partial),
        no_data = report.count(HazardStatus::NoData),
        failed = report.count(HazardStatus::Failed),
        "Export complete",
    );

    Ok(report)
}

pub fn exit_code(report: &ExportReport) -> u8 {
    if report.all_exported() {
        EXIT_OK
    } else {
        EXIT_INCOMPLETE
    }
}
