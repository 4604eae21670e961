//! Run-length row summaries.
//!
//! Each row becomes a comma-joined list of `letter,count` pairs, one pair
//! per maximal run of identical bands, left to right. For a row
//! `G G G Y Y R` the line is `G,3,Y,2,R,1`. The counts of a line always
//! sum to the grid width, and expanding the line reproduces the row.

use crate::band::Band;
use crate::grid::ClassifiedGrid;

/// A maximal run of one band within a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub band: Band,
    pub count: usize,
}

/// Errors raised when expanding an RPT line back into bands.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum RunLengthError {
    #[error("odd number of fields in run-length line: {0}")]
    UnpairedField(usize),

    #[error("unknown band letter {0:?}")]
    UnknownLetter(String),

    #[error("invalid run count {0:?}")]
    InvalidCount(String),
}

/// One RPT line per row.
pub fn encode(grid: &ClassifiedGrid) -> Vec<String> {
    grid.rows().map(|row| format_runs(&runs(row))).collect()
}

/// Split a row into maximal runs.
pub fn runs(row: &[Band]) -> Vec<Run> {
    let mut out = Vec::new();
    let mut current: Option<Run> = None;

    for &band in row {
        if let Some(run) = current.as_mut() {
            if run.band == band {
                run.count += 1;
                continue;
            }
        }
        if let Some(done) = current.replace(Run { band, count: 1 }) {
            out.push(done);
        }
    }

    // The last run is still open when the scan ends.
    out.extend(current);
    out
}

/// Render runs as `letter,count,letter,count,...`.
pub fn format_runs(runs: &[Run]) -> String {
    runs.iter()
        .map(|run| format!("{},{}", run.band.letter(), run.count))
        .collect::<Vec<_>>()
        .join(",")
}

/// Expand an RPT line back into the row's bands.
pub fn expand_line(line: &str) -> Result<Vec<Band>, RunLengthError> {
    if line.is_empty() {
        return Ok(Vec::new());
    }

    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() % 2 != 0 {
        return Err(RunLengthError::UnpairedField(fields.len()));
    }

    let mut row = Vec::new();
    for pair in fields.chunks_exact(2) {
        let (letter, count) = (pair[0], pair[1]);

        let mut chars = letter.chars();
        let band = match (chars.next(), chars.next()) {
            (Some(c), None) => Band::from_letter(c),
            _ => None,
        }
        .ok_or_else(|| RunLengthError::UnknownLetter(letter.to_string()))?;

        let count: usize = count
            .parse()
            .ok()
            .filter(|&n| n > 0)
            .ok_or_else(|| RunLengthError::InvalidCount(count.to_string()))?;

        row.extend(std::iter::repeat(band).take(count));
    }
    Ok(row)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
