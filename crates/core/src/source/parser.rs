//! Source text to [`ReadingGrid`].

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::{read_lines, split_fields, Dimensions, METADATA_LINES};
use crate::error::HazardError;
use crate::grid::{ReadingGrid, SourceMetadata};
use crate::types::Reading;

/// Parse a source whose dimensions are already known.
///
/// Lines past `height` data rows are ignored. A short or long row, or a
/// missing line, is a [`HazardError::MalformedRow`]; absent readings are
/// never filled in.
pub fn parse_source(path: &Path, dims: Dimensions) -> Result<ReadingGrid, HazardError> {
    let file = File::open(path).map_err(|source| HazardError::SourceUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    parse_from_reader(BufReader::new(file), path, dims)
}

/// Same as [`parse_source`] over any buffered reader. `path` is only used
/// to label errors.
pub fn parse_from_reader<R: BufRead>(
    reader: R,
    path: &Path,
    dims: Dimensions,
) -> Result<ReadingGrid, HazardError> {
    let unreadable = |source| HazardError::SourceUnreadable {
        path: path.to_path_buf(),
        source,
    };
    let mut lines = read_lines(reader);

    let mut header = Vec::with_capacity(METADATA_LINES);
    for _ in 0..METADATA_LINES {
        match lines.next() {
            Some(line) => header.push(line.map_err(unreadable)?),
            None => {
                return Err(HazardError::SourceTooShort {
                    path: path.to_path_buf(),
                    line_count: header.len(),
                })
            }
        }
    }
    let mut header = header.into_iter();
    let metadata = SourceMetadata {
        location: header.next().unwrap_or_default(),
        date: header.next().unwrap_or_default(),
        time: header.next().unwrap_or_default(),
    };

    let mut rows = Vec::with_capacity(dims.height);
    for row in 0..dims.height {
        let line_no = METADATA_LINES + row + 1;
        let line = match lines.next() {
            Some(line) => line.map_err(unreadable)?,
            None => String::new(),
        };
        rows.push(parse_row(&line, path, line_no, dims.width)?);
    }

    ReadingGrid::from_rows(metadata, dims.width, rows).map_err(|ragged| {
        HazardError::MalformedRow {
            path: path.to_path_buf(),
            line: METADATA_LINES + ragged.row + 1,
            expected: ragged.expected,
            found: ragged.found,
        }
    })
}

fn parse_row(
    line: &str,
    path: &Path,
    line_no: usize,
    width: usize,
) -> Result<Vec<Reading>, HazardError> {
    let fields = split_fields(line);
    if fields.len() != width {
        return Err(HazardError::MalformedRow {
            path: path.to_path_buf(),
            line: line_no,
            expected: width,
            found: fields.len(),
        });
    }

    fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            field
                .parse::<Reading>()
                .map_err(|_| HazardError::NonNumericReading {
                    path: path.to_path_buf(),
                    line: line_no,
                    column: i + 1,
                    value: (*field).to_string(),
                })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
