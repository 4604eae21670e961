//! Reading and classified grid values.
//!
//! Both grids are immutable once constructed and are rebuilt for every
//! hazard pass. Cells are stored row-major.

use serde::Serialize;

use crate::band::{classify, Band};
use crate::hazard::HazardProfile;
use crate::types::Reading;

/// The three free-form header lines of a source, kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceMetadata {
    pub location: String,
    pub date: String,
    pub time: String,
}

/// Rectangular grid of raw readings plus its source metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingGrid {
    metadata: SourceMetadata,
    width: usize,
    height: usize,
    cells: Vec<Reading>,
}

/// Rejected grid construction: row `row` (0-indexed) had `found` cells
/// where `expected` were required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaggedRow {
    pub row: usize,
    pub expected: usize,
    pub found: usize,
}

impl ReadingGrid {
    /// Build a grid from rows. Every row must have exactly `width`
    /// readings; there is no zero-fill for missing cells.
    pub fn from_rows(
        metadata: SourceMetadata,
        width: usize,
        rows: Vec<Vec<Reading>>,
    ) -> Result<Self, RaggedRow> {
        let height = rows.len();
        let mut cells = Vec::with_capacity(width * height);
        for (row, readings) in rows.into_iter().enumerate() {
            if readings.len() != width {
                return Err(RaggedRow {
                    row,
                    expected: width,
                    found: readings.len(),
                });
            }
            cells.extend(readings);
        }
        Ok(Self {
            metadata,
            width,
            height,
            cells,
        })
    }

    pub fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Reading at `(col, row)`, 0-indexed. `None` outside the grid.
    pub fn get(&self, col: usize, row: usize) -> Option<Reading> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.cells.get(row * self.width + col).copied()
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Reading]> {
        let width = self.width;
        (0..self.height).map(move |row| &self.cells[row * width..(row + 1) * width])
    }

    /// Classify every cell, consuming the grid.
    pub fn classify(self, profile: &HazardProfile) -> ClassifiedGrid {
        let cells = self.cells.iter().map(|&r| classify(r, profile)).collect();
        ClassifiedGrid {
            metadata: self.metadata,
            width: self.width,
            height: self.height,
            cells,
        }
    }
}

/// Parallel to [`ReadingGrid`], one [`Band`] per cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedGrid {
    metadata: SourceMetadata,
    width: usize,
    height: usize,
    cells: Vec<Band>,
}

impl ClassifiedGrid {
    /// Build directly from band rows. Used where readings are not needed.
    pub fn from_rows(
        metadata: SourceMetadata,
        width: usize,
        rows: Vec<Vec<Band>>,
    ) -> Result<Self, RaggedRow> {
        let height = rows.len();
        let mut cells = Vec::with_capacity(width * height);
        for (row, bands) in rows.into_iter().enumerate() {
            if bands.len() != width {
                return Err(RaggedRow {
                    row,
                    expected: width,
                    found: bands.len(),
                });
            }
            cells.extend(bands);
        }
        Ok(Self {
            metadata,
            width,
            height,
            cells,
        })
    }

    pub fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, col: usize, row: usize) -> Option<Band> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.cells.get(row * self.width + col).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Band]> {
        let width = self.width;
        (0..self.height).map(move |row| &self.cells[row * width..(row + 1) * width])
    }

    /// Every cell with its 0-indexed `(col, row)`, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Band)> + '_ {
        let width = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &band)| (i % width, i / width, band))
    }

    /// Number of cells in each band, in [`Band::ALL`] order.
    pub fn band_counts(&self) -> [usize; 4] {
        let mut counts = [0; 4];
        for &band in &self.cells {
            counts[band as usize] += 1;
        }
        counts
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn co() -> HazardProfile {
        HazardProfile::new("CO", "Carbon Monoxide", 1, 8, 25)
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = ReadingGrid::from_rows(SourceMetadata::default(), 3, vec![vec![1, 2, 3], vec![4]])
            .expect_err("second row is short");
        assert_eq!(
            err,
            RaggedRow {
                row: 1,
                expected: 3,
                found: 1
            }
        );
    }

    #[test]
    fn lookup_by_column_and_row() {
        let grid = ReadingGrid::from_rows(
            SourceMetadata::default(),
            3,
            vec![vec![1, 2, 3], vec![4, 5, 6]],
        )
        .expect("rectangular");
        assert_eq!(grid.get(0, 0), Some(1));
        assert_eq!(grid.get(2, 1), Some(6));
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.get(0, 2), None);
    }

    #[test]
    fn classify_keeps_shape_and_metadata() {
        let metadata = SourceMetadata {
            location: "North yard".to_string(),
            date: "2017-05-01".to_string(),
            time: "09:00".to_string(),
        };
        let grid = ReadingGrid::from_rows(metadata.clone(), 2, vec![vec![0, 0], vec![1, 1]])
            .expect("rectangular");
        let classified = grid.classify(&co());

        assert_eq!(classified.metadata(), &metadata);
        assert_eq!((classified.width(), classified.height()), (2, 2));
        assert_eq!(classified.get(1, 0), Some(Band::Clear));
        assert_eq!(classified.get(0, 1), Some(Band::Acceptable));
    }

    #[test]
    fn cells_iterate_row_major() {
        let grid = ReadingGrid::from_rows(
            SourceMetadata::default(),
            2,
            vec![vec![0, 8], vec![25, 1]],
        )
        .expect("rectangular")
        .classify(&co());
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(
            cells,
            vec![
                (0, 0, Band::Clear),
                (1, 0, Band::Concerning),
                (0, 1, Band::Dangerous),
                (1, 1, Band::Acceptable),
            ]
        );
        assert_eq!(grid.band_counts(), [1, 1, 1, 1]);
    }

    #[test]
    fn empty_grid_has_no_rows() {
        let grid = ReadingGrid::from_rows(SourceMetadata::default(), 0, vec![]).expect("empty");
        assert_eq!(grid.rows().count(), 0);
        assert_eq!(grid.classify(&co()).cells().count(), 0);
    }
}
