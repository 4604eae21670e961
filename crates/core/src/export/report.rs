//! Per-run summary of what the orchestrator produced.

use std::path::PathBuf;

use serde::Serialize;

use crate::grid::ClassifiedGrid;
use crate::source::Dimensions;
use crate::types::Timestamp;

/// How a single hazard pass ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardStatus {
    /// All three artifacts written.
    Exported,
    /// Grid encoded but at least one artifact failed to write.
    Partial,
    /// The source held no readings; nothing written.
    NoData,
    /// Source or export directory error; nothing written.
    Failed,
}

/// Cell counts per band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BandSummary {
    pub clear: usize,
    pub acceptable: usize,
    pub concerning: usize,
    pub dangerous: usize,
}

impl From<&ClassifiedGrid> for BandSummary {
    fn from(grid: &ClassifiedGrid) -> Self {
        let [clear, acceptable, concerning, dangerous] = grid.band_counts();
        Self {
            clear,
            acceptable,
            concerning,
            dangerous,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HazardOutcome {
    pub code: String,
    pub name: String,
    pub source: PathBuf,
    pub status: HazardStatus,
    pub dimensions: Option<Dimensions>,
    pub bands: Option<BandSummary>,
    pub artifacts: Vec<PathBuf>,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    pub started_at: Timestamp,
    pub finished_at: Timestamp,
    pub export_dir: PathBuf,
    pub hazards: Vec<HazardOutcome>,
}

impl ExportReport {
    /// Every hazard wrote all three artifacts.
    pub fn all_exported(&self) -> bool {
        self.hazards
            .iter()
            .all(|h| h.status == HazardStatus::Exported)
    }

    pub fn count(&self, status: HazardStatus) -> usize {
        self.hazards.iter().filter(|h| h.status == status).count()
    }

    pub fn outcome(&self, code: &str) -> Option<&HazardOutcome> {
        self.hazards.iter().find(|h| h.code == code)
    }
}
