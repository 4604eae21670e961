//! Reading delimited sensor sources.
//!
//! A source is plain text: three metadata lines (location, date, time)
//! followed by one comma-separated line of readings per grid row.

use std::io::{self, BufRead};

pub mod dimensions;
pub mod layout;
pub mod parser;

pub use dimensions::{infer_dimensions, Dimensions};
pub use layout::SourceLayout;
pub use parser::parse_source;

/// Number of metadata lines preceding the readings.
pub const METADATA_LINES: usize = 3;

/// Source file extension.
pub const SOURCE_EXTENSION: &str = "csv";

/// Split a data line into trimmed fields.
///
/// Trailing empty fields are dropped so rows written with a trailing
/// comma keep their natural width.
pub(crate) fn split_fields(line: &str) -> Vec<&str> {
    let mut fields: Vec<&str> = line.split(',').map(str::trim).collect();
    while fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields
}

/// Lines of a source split on `\n`, with a trailing `\r` removed.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD instead of
/// failing the read, so a Latin-1 location line still loads.
pub(crate) fn read_lines<R: BufRead>(reader: R) -> impl Iterator<Item = io::Result<String>> {
    reader.split(b'\n').map(|line| {
        let mut bytes = line?;
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    })
}
