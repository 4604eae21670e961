use crate::grid::ClassifiedGrid;

/// One `"<col>,<row>,<letter>"` line per cell, coordinates 1-indexed.
pub fn encode(grid: &ClassifiedGrid) -> Vec<String> {
    grid.cells()
        .map(|(col, row, band)| format!("{},{},{}", col + 1, row + 1, band.letter()))
        .collect()
}
