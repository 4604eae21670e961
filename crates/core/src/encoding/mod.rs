//! Serializers for the three export artifacts.
//!
//! Each encoder is independent and reads a [`ClassifiedGrid`] in
//! row-major order (rows top to bottom, columns left to right).
//!
//! - [`raf`]: one letter per cell, no separators.
//! - [`dat`]: one `col,row,letter` line per cell, 1-indexed.
//! - [`rpt`]: one run-length line per row.

pub mod dat;
pub mod raf;
pub mod rpt;

use crate::grid::ClassifiedGrid;

/// The three serialized payloads for one hazard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBundle {
    pub raf: String,
    pub dat: Vec<String>,
    pub rpt: Vec<String>,
}

impl ExportBundle {
    /// Run all three encoders over `grid`.
    pub fn encode(grid: &ClassifiedGrid) -> Self {
        Self {
            raf: raf::encode(grid),
            dat: dat::encode(grid),
            rpt: rpt::encode(grid),
        }
    }
}
