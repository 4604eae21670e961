//! Artifact persistence and the per-hazard export pipeline.

pub mod orchestrator;
pub mod report;
pub mod writer;

pub use orchestrator::{export_hazard, run_export, ExportSettings};
pub use report::{BandSummary, ExportReport, HazardOutcome, HazardStatus};
pub use writer::{write_bundle, ArtifactKind, ExportTarget, WriteOutcome, DEFAULT_EXPORT_DIR};
