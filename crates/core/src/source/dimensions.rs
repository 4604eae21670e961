//! Grid size discovery ahead of parsing.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Serialize;

use super::{read_lines, split_fields, METADATA_LINES};
use crate::error::HazardError;

/// Width (columns) and height (rows) of a source's reading grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

impl Dimensions {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// No data rows at all: the source is metadata only.
    ///
    /// A zero `width` with data rows present is not empty; those rows are
    /// still parsed and any non-blank one is malformed.
    pub fn is_empty(&self) -> bool {
        self.height == 0
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }
}

/// Count the rows and columns of a source without building the grid.
///
/// `height` is the number of lines after the three metadata lines;
/// `width` is the field count of the first of those lines. A source of
/// exactly three lines yields `0 x 0`.
pub fn infer_dimensions(path: &Path) -> Result<Dimensions, HazardError> {
    let file = File::open(path).map_err(|source| HazardError::SourceUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    infer_from_reader(BufReader::new(file), path)
}

/// Same as [`infer_dimensions`] over any buffered reader. `path` is only
/// used to label errors.
pub fn infer_from_reader<R: BufRead>(reader: R, path: &Path) -> Result<Dimensions, HazardError> {
    let mut line_count = 0;
    let mut width = 0;

    for line in read_lines(reader) {
        let line = line.map_err(|source| HazardError::SourceUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        line_count += 1;
        if line_count == METADATA_LINES + 1 {
            width = split_fields(&line).len();
        }
    }

    if line_count < METADATA_LINES {
        return Err(HazardError::SourceTooShort {
            path: path.to_path_buf(),
            line_count,
        });
    }

    Ok(Dimensions {
        width,
        height: line_count - METADATA_LINES,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use assert_matches::assert_matches;

    use super::*;

    fn infer(text: &str) -> Result<Dimensions, HazardError> {
        infer_from_reader(Cursor::new(text), Path::new("test.csv"))
    }

    #[test]
    fn counts_rows_after_metadata_and_columns_of_first_row() {
        let dims = infer("Site A\n2017-05-01\n09:00\n0,1,2\n3,4,5\n").expect("dimensions");
        assert_eq!(dims, Dimensions::new(3, 2));
        assert_eq!(dims.cell_count(), 6);
    }

    #[test]
    fn metadata_only_source_is_empty() {
        let dims = infer("Site A\n2017-05-01\n09:00\n").expect("dimensions");
        assert_eq!(dims, Dimensions::new(0, 0));
        assert!(dims.is_empty());
    }

    #[test]
    fn fewer_than_three_lines_is_too_short() {
        assert_matches!(
            infer("Site A\n2017-05-01\n"),
            Err(HazardError::SourceTooShort { line_count: 2, .. })
        );
        assert_matches!(infer(""), Err(HazardError::SourceTooShort { line_count: 0, .. }));
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let dims = infer("Site A\r\n2017-05-01\r\n09:00\r\n1,2\r\n3,4\r\n").expect("dimensions");
        assert_eq!(dims, Dimensions::new(2, 2));
    }

    #[test]
    fn blank_first_data_row_is_not_empty() {
        let dims = infer("Yard\n01/05\n09:00\n\n40,40,40\n").expect("dimensions");
        assert_eq!(dims, Dimensions::new(0, 2));
        assert!(!dims.is_empty());
    }

    #[test]
    fn latin1_metadata_does_not_fail_inference() {
        let text = b"Caf\xe9 Yard\n01/05\n09:00\n1,2\n".to_vec();
        let dims = infer_from_reader(Cursor::new(text), Path::new("test.csv")).expect("dimensions");
        assert_eq!(dims, Dimensions::new(2, 1));
    }

    #[test]
    fn missing_file_is_unreadable() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let result = infer_dimensions(&dir.path().join("Ians_W7_SO2.csv"));
        assert_matches!(result, Err(HazardError::SourceUnreadable { .. }));
    }
}
