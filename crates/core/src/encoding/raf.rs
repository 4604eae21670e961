use crate::grid::ClassifiedGrid;

/// Concatenate every cell's letter. Length is always `width * height`.
pub fn encode(grid: &ClassifiedGrid) -> String {
    grid.cells().map(|(_, _, band)| band.letter()).collect()
}
