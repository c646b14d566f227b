//! Comma-separated text reader.
//!
//! Exports of the boat-items sheet carry a few title lines before the data
//! and quote descriptions that contain commas, e.g.
//! ```text
//! FY550,Casco,"Casco em fibra, com reforço"
//! ```

use memorial_core::{SourceFormat, ValidationPolicy};

use crate::extract::{Extraction, RowDefect};
use crate::row::record_from_cells;

/// Byte offset where line `n` (0-based) starts, or `None` past the end.
fn line_start(content: &[u8], n: usize) -> Option<usize> {
    if n == 0 {
        return Some(0);
    }
    content
        .iter()
        .enumerate()
        .filter(|&(_, &b)| b == b'\n')
        .nth(n - 1)
        .map(|(i, _)| i + 1)
}

/// Parse delimited content, skipping `header_lines` physical lines first.
///
/// Fields wrapped in `"` may contain commas; `""` inside a quoted field is a
/// literal quote. Rows with fewer than three fields, an empty first field, or
/// undecodable bytes are skipped.
pub fn parse_delimited(content: &[u8], header_lines: usize, policy: ValidationPolicy) -> Extraction {
    let mut extraction = Extraction::new(SourceFormat::Delimited);

    let Some(start) = line_start(content, header_lines) else {
        return extraction;
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(&content[start..]);

    for result in reader.records() {
        match result {
            Ok(record) => {
                let line = record.position().map_or(0, |p| p.line() as usize) + header_lines;
                let cells: Vec<&str> = record.iter().collect();
                extraction.accept(line, record_from_cells(&cells, policy));
            }
            Err(e) => {
                let line = e.position().map_or(0, |p| p.line() as usize) + header_lines;
                extraction.accept(line, Err(RowDefect::Unreadable(e.to_string())));
            }
        }
    }

    extraction
}

#[cfg(test)]
#[path = "tests/delimited_tests.rs"]
mod tests;
