//! Sequential parse, classify, encode and write for every hazard.

use chrono::Utc;

use super::report::{BandSummary, ExportReport, HazardOutcome, HazardStatus};
use super::writer::{write_bundle, ExportTarget};
use crate::encoding::ExportBundle;
use crate::error::HazardError;
use crate::hazard::{HazardProfile, HazardRegistry};
use crate::source::{infer_dimensions, parse_source, SourceLayout};

/// Where sources are read from and artifacts written to.
#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub sources: SourceLayout,
    pub target: ExportTarget,
}

/// Export every hazard in registry order.
///
/// Hazards are processed one at a time with fresh grids. A failure on one
/// hazard is recorded in the report and the remaining hazards are still
/// attempted.
pub fn run_export(settings: &ExportSettings, registry: &HazardRegistry) -> ExportReport {
    let started_at = Utc::now();

    let hazards = registry
        .iter()
        .map(|profile| export_hazard(settings, profile))
        .collect();

    ExportReport {
        started_at,
        finished_at: Utc::now(),
        export_dir: settings.target.dir().to_path_buf(),
        hazards,
    }
}

/// Run one hazard pass and summarise it.
pub fn export_hazard(settings: &ExportSettings, profile: &HazardProfile) -> HazardOutcome {
    let source = settings.sources.path_for(&profile.code);
    let mut outcome = HazardOutcome {
        code: profile.code.clone(),
        name: profile.name.clone(),
        source: source.clone(),
        status: HazardStatus::Failed,
        dimensions: None,
        bands: None,
        artifacts: Vec::new(),
        errors: Vec::new(),
    };

    tracing::info!(
        hazard = %profile.code,
        source = %source.display(),
        manual = settings.sources.is_overridden(&profile.code),
        "Exporting hazard",
    );

    let dims = match infer_dimensions(&source) {
        Ok(dims) => dims,
        Err(e) => return failed(outcome, e),
    };
    outcome.dimensions = Some(dims);

    if dims.is_empty() {
        tracing::warn!(hazard = %profile.code, "Source has no readings -- skipping export");
        outcome.status = HazardStatus::NoData;
        return outcome;
    }

    let grid = match parse_source(&source, dims) {
        Ok(grid) => grid,
        Err(e) => return failed(outcome, e),
    };
    let classified = grid.classify(profile);
    outcome.bands = Some(BandSummary::from(&classified));

    let bundle = ExportBundle::encode(&classified);
    let written = match write_bundle(&settings.target, &profile.code, &bundle) {
        Ok(written) => written,
        Err(e) => return failed(outcome, e),
    };

    outcome.status = if written.is_complete() {
        HazardStatus::Exported
    } else {
        HazardStatus::Partial
    };
    outcome.artifacts = written.written;
    outcome.errors = written.failures.iter().map(ToString::to_string).collect();

    tracing::info!(
        hazard = %profile.code,
        width = dims.width,
        height = dims.height,
        status = ?outcome.status,
        "Hazard export finished",
    );

    outcome
}

fn failed(mut outcome: HazardOutcome, error: HazardError) -> HazardOutcome {
    tracing::warn!(hazard = %outcome.code, error = %error, "Hazard export skipped");
    outcome.status = HazardStatus::Failed;
    outcome.errors.push(error.to_string());
    outcome
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::export::writer::ArtifactKind;
    use crate::source::Dimensions;

    fn write_source(dir: &Path, name: &str, body: &str) {
        std::fs::write(dir.join(name), body).expect("write source");
    }

    fn settings(root: &Path) -> ExportSettings {
        ExportSettings {
            sources: SourceLayout::new(root, "Ians_W7"),
            target: ExportTarget::new(root.join("export"), "Ians_W7"),
        }
    }

    #[test]
    fn exports_single_hazard() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        write_source(tmp.path(), "Ians_W7_CO.csv", "Yard\n01/05/2017\n09:00\n0,0\n1,1\n");

        let registry = HazardRegistry::default();
        let co = registry.get("CO").expect("CO");
        let outcome = export_hazard(&settings(tmp.path()), co);

        assert_eq!(outcome.status, HazardStatus::Exported);
        assert_eq!(outcome.artifacts.len(), 3);
        assert_eq!(
            outcome.bands,
            Some(BandSummary {
                clear: 2,
                acceptable: 2,
                concerning: 0,
                dangerous: 0,
            })
        );

        let target = settings(tmp.path()).target;
        let raf = std::fs::read_to_string(target.artifact_path("CO", ArtifactKind::Raf))
            .expect("read RAF");
        assert_eq!(raf, "WWGG");
    }

    #[test]
    fn metadata_only_source_is_no_data() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        write_source(tmp.path(), "Ians_W7_SO2.csv", "Yard\n01/05/2017\n09:00\n");

        let registry = HazardRegistry::default();
        let outcome = export_hazard(&settings(tmp.path()), registry.get("SO2").expect("SO2"));

        assert_eq!(outcome.status, HazardStatus::NoData);
        assert!(outcome.artifacts.is_empty());
        assert!(!tmp.path().join("export").exists());
    }

    #[test]
    fn blank_first_data_row_is_malformed_not_no_data() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        write_source(tmp.path(), "Ians_W7_SO2.csv", "Yard\n01/05\n09:00\n\n40,40,40\n5,5,5\n");

        let registry = HazardRegistry::default();
        let outcome = export_hazard(&settings(tmp.path()), registry.get("SO2").expect("SO2"));

        assert_eq!(outcome.status, HazardStatus::Failed);
        assert_eq!(outcome.dimensions, Some(Dimensions::new(0, 3)));
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].contains("line 5: expected 0 field(s), found 3"));
        assert!(!tmp.path().join("export").exists());
    }

    #[test]
    fn blocked_artifact_makes_hazard_partial() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        write_source(tmp.path(), "Ians_W7_CO.csv", "Yard\n01/05/2017\n09:00\n0,30\n");

        let settings = settings(tmp.path());
        std::fs::create_dir_all(settings.target.artifact_path("CO", ArtifactKind::Rpt))
            .expect("block RPT");

        let registry = HazardRegistry::default();
        let outcome = export_hazard(&settings, registry.get("CO").expect("CO"));

        assert_eq!(outcome.status, HazardStatus::Partial);
        assert_eq!(outcome.artifacts.len(), 2);
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].starts_with("Artifact write failed"));
        assert!(outcome.errors[0].contains("Ians_W7_CO.RPT"));
        assert!(settings.target.artifact_path("CO", ArtifactKind::Raf).is_file());
    }

    #[test]
    fn malformed_source_fails_without_artifacts() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        write_source(tmp.path(), "Ians_W7_NO2.csv", "Yard\n01/05/2017\n09:00\n1,2,3\n4,5\n");

        let registry = HazardRegistry::default();
        let outcome = export_hazard(&settings(tmp.path()), registry.get("NO2").expect("NO2"));

        assert_eq!(outcome.status, HazardStatus::Failed);
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].contains("Malformed row"));
        assert!(outcome.artifacts.is_empty());
    }

    #[test]
    fn override_path_is_used_for_that_hazard() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        write_source(tmp.path(), "picked_by_hand.csv", "Yard\n01/05/2017\n09:00\n0,1,2,3\n");

        let mut settings = settings(tmp.path());
        settings.sources = settings
            .sources
            .with_override("Obstruct", tmp.path().join("picked_by_hand.csv"));

        let registry = HazardRegistry::default();
        let outcome = export_hazard(&settings, registry.get("Obstruct").expect("Obstruct"));

        assert_eq!(outcome.status, HazardStatus::Exported);
        let rpt = std::fs::read_to_string(settings.target.artifact_path("Obstruct", ArtifactKind::Rpt))
            .expect("read RPT");
        assert_eq!(rpt, "W,1,G,1,Y,1,R,1\n");
    }
}
