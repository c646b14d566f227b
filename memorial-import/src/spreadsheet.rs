//! Minimal `.xlsx` reader.
//!
//! A workbook is a zip archive of XML parts. Only what is needed to read cell
//! text positionally is parsed: the shared string table, the workbook's sheet
//! list (to find the active sheet), and the sheet's `<row>`/`<c>` elements.

use std::collections::HashMap;
use std::io::{Read, Seek};

use memorial_core::{SourceFormat, ValidationPolicy};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::ImportError;
use crate::extract::Extraction;
use crate::row::{REQUIRED_FIELDS, record_from_cells};

const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";
const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";
const FALLBACK_SHEET_PART: &str = "xl/worksheets/sheet1.xml";

/// One worksheet row with cells placed by column (`A` = 0).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    /// 1-based row number as stored in the sheet.
    pub number: usize,
    pub cells: Vec<Option<String>>,
}

impl SheetRow {
    /// Text of the cell at `col`, empty when absent.
    pub fn cell(&self, col: usize) -> &str {
        self.cells.get(col).and_then(|c| c.as_deref()).unwrap_or("")
    }
}

/// Read every row of the workbook's active sheet.
pub fn read_active_sheet<R: Read + Seek>(reader: R) -> Result<Vec<SheetRow>, ImportError> {
    let mut archive = ZipArchive::new(reader)?;

    let shared = match read_part(&mut archive, SHARED_STRINGS_PART)? {
        Some(xml) => parse_shared_strings(&xml)?,
        None => Vec::new(),
    };

    let sheet_part = locate_active_sheet(&mut archive)?;
    log::debug!("Reading worksheet part {sheet_part}");

    let xml = read_part(&mut archive, &sheet_part)?
        .ok_or_else(|| ImportError::invalid_workbook(format!("missing worksheet part {sheet_part}")))?;
    parse_sheet(&xml, &shared)
}

/// Convert sheet rows to records, skipping rows up to `header_rows`.
///
/// Columns A/B/C map to model/category/description. Absent cells read as
/// empty text, so a row only fails the field-count check if it has no cells
/// at all.
pub fn rows_to_records(rows: &[SheetRow], header_rows: usize, policy: ValidationPolicy) -> Extraction {
    let mut extraction = Extraction::new(SourceFormat::Spreadsheet);
    for row in rows.iter().filter(|r| r.number > header_rows) {
        let cells: Vec<&str> = (0..REQUIRED_FIELDS).map(|c| row.cell(c)).collect();
        extraction.accept(row.number, record_from_cells(&cells, policy));
    }
    extraction
}

/// Read a part as text, `None` if the archive doesn't contain it.
fn read_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<String>, ImportError> {
    let mut file = match archive.by_name(name) {
        Ok(f) => f,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(Some(contents))
}

/// Resolve the archive path of the active sheet.
fn locate_active_sheet<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<String, ImportError> {
    let Some(workbook) = read_part(archive, WORKBOOK_PART)? else {
        return Ok(FALLBACK_SHEET_PART.to_string());
    };
    let (active_tab, sheet_ids) = parse_workbook(&workbook)?;
    let rel_id = sheet_ids
        .get(active_tab)
        .or_else(|| sheet_ids.first())
        .ok_or_else(|| ImportError::invalid_workbook("workbook lists no sheets"))?;

    let Some(rels) = read_part(archive, WORKBOOK_RELS_PART)? else {
        return Ok(FALLBACK_SHEET_PART.to_string());
    };
    let targets = parse_relationships(&rels)?;
    let target = targets
        .get(rel_id)
        .ok_or_else(|| ImportError::invalid_workbook(format!("no relationship for sheet {rel_id}")))?;

    Ok(resolve_target(target))
}

/// Relationship targets are relative to `xl/` unless absolute.
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("xl/{target}"),
    }
}

fn attr_value(e: &BytesStart<'_>, local: &[u8]) -> Result<Option<String>, ImportError> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.local_name().as_ref() == local {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Returns `(activeTab, sheet relationship ids in tab order)`.
fn parse_workbook(xml: &str) -> Result<(usize, Vec<String>), ImportError> {
    let mut reader = Reader::from_str(xml);
    let mut active_tab = 0;
    let mut sheet_ids = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => match e.local_name().as_ref() {
                b"workbookView" => {
                    if let Some(tab) = attr_value(&e, b"activeTab")? {
                        active_tab = tab.parse().unwrap_or(0);
                    }
                }
                b"sheet" => {
                    // `r:id`; the `sheetId` attribute has a different local name
                    if let Some(id) = attr_value(&e, b"id")? {
                        sheet_ids.push(id);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok((active_tab, sheet_ids))
}

fn parse_relationships(xml: &str) -> Result<HashMap<String, String>, ImportError> {
    let mut reader = Reader::from_str(xml);
    let mut targets = HashMap::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                let id = attr_value(&e, b"Id")?;
                let target = attr_value(&e, b"Target")?;
                if let (Some(id), Some(target)) = (id, target) {
                    targets.insert(id, target);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(targets)
}

/// Parse `xl/sharedStrings.xml` into its string table.
///
/// Rich-text runs of one `<si>` are concatenated; phonetic hints (`<rPh>`)
/// are dropped.
fn parse_shared_strings(xml: &str) -> Result<Vec<String>, ImportError> {
    let mut reader = Reader::from_str(xml);
    let mut strings = Vec::new();
    let mut current: Option<String> = None;
    let mut in_text = false;
    let mut in_phonetic = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"si" => current = Some(String::new()),
                b"t" => in_text = true,
                b"rPh" => in_phonetic = true,
                _ => {}
            },
            Event::Empty(e) if e.local_name().as_ref() == b"si" => strings.push(String::new()),
            Event::Text(e) => {
                if in_text && !in_phonetic {
                    if let Some(s) = current.as_mut() {
                        s.push_str(&e.unescape()?);
                    }
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"si" => strings.push(current.take().unwrap_or_default()),
                b"t" => in_text = false,
                b"rPh" => in_phonetic = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(strings)
}

/// Widest column reference a worksheet can hold (`XFD`).
const MAX_COLUMN_LETTERS: usize = 3;

/// Column index from a cell reference: `"A1"` → 0, `"AB12"` → 27.
///
/// `None` when the reference has no column letters or more than fit a sheet.
pub(crate) fn column_index(cell_ref: &str) -> Option<usize> {
    let letters: Vec<u8> = cell_ref
        .bytes()
        .take_while(u8::is_ascii_alphabetic)
        .map(|b| b.to_ascii_uppercase())
        .collect();
    if letters.is_empty() || letters.len() > MAX_COLUMN_LETTERS {
        return None;
    }
    let n = letters
        .iter()
        .fold(0usize, |acc, &b| acc * 26 + usize::from(b - b'A' + 1));
    Some(n - 1)
}

/// A `<c>` element being assembled.
struct PendingCell {
    col: usize,
    cell_type: Option<String>,
    value: String,
}

fn resolve_cell(cell: &PendingCell, shared: &[String]) -> Result<Option<String>, ImportError> {
    let text = match cell.cell_type.as_deref() {
        Some("s") => {
            let index: usize = cell.value.trim().parse().map_err(|_| {
                ImportError::invalid_workbook(format!("bad shared string index '{}'", cell.value))
            })?;
            shared
                .get(index)
                .cloned()
                .ok_or_else(|| ImportError::invalid_workbook(format!("shared string {index} out of range")))?
        }
        Some("b") => {
            if cell.value.trim() == "1" {
                "TRUE".to_string()
            } else {
                "FALSE".to_string()
            }
        }
        // inlineStr, str, numbers, errors and dates are kept as stored
        _ => cell.value.clone(),
    };
    Ok(if text.is_empty() { None } else { Some(text) })
}

fn place_cell(cells: &mut Vec<Option<String>>, col: usize, value: Option<String>) {
    if value.is_none() {
        return;
    }
    if cells.len() <= col {
        cells.resize(col + 1, None);
    }
    cells[col] = value;
}

/// Parse a worksheet part into rows.
fn parse_sheet(xml: &str, shared: &[String]) -> Result<Vec<SheetRow>, ImportError> {
    let mut reader = Reader::from_str(xml);
    let mut rows = Vec::new();
    let mut current: Option<SheetRow> = None;
    let mut cell: Option<PendingCell> = None;
    let mut next_col = 0;
    let mut last_row = 0;
    let mut in_value = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"row" => {
                    let number = row_number(&e, last_row)?;
                    last_row = number;
                    next_col = 0;
                    current = Some(SheetRow {
                        number,
                        cells: Vec::new(),
                    });
                }
                b"c" => {
                    let col = cell_column(&e, next_col)?;
                    next_col = col + 1;
                    cell = Some(PendingCell {
                        col,
                        cell_type: attr_value(&e, b"t")?,
                        value: String::new(),
                    });
                }
                // `<v>` for stored values, `<t>` inside `<is>` for inline strings
                b"v" | b"t" => in_value = cell.is_some(),
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"row" => {
                    let number = row_number(&e, last_row)?;
                    last_row = number;
                    rows.push(SheetRow {
                        number,
                        cells: Vec::new(),
                    });
                }
                b"c" => {
                    next_col = cell_column(&e, next_col)? + 1;
                }
                _ => {}
            },
            Event::Text(e) => {
                if in_value {
                    if let Some(c) = cell.as_mut() {
                        c.value.push_str(&e.unescape()?);
                    }
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"v" | b"t" => in_value = false,
                b"c" => {
                    if let Some(done) = cell.take() {
                        let value = resolve_cell(&done, shared)?;
                        if let Some(row) = current.as_mut() {
                            place_cell(&mut row.cells, done.col, value);
                        }
                    }
                }
                b"row" => {
                    if let Some(row) = current.take() {
                        rows.push(row);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(rows)
}

fn row_number(e: &BytesStart<'_>, last_row: usize) -> Result<usize, ImportError> {
    Ok(attr_value(e, b"r")?
        .and_then(|r| r.parse().ok())
        .unwrap_or(last_row + 1))
}

fn cell_column(e: &BytesStart<'_>, next_col: usize) -> Result<usize, ImportError> {
    Ok(attr_value(e, b"r")?
        .and_then(|r| column_index(&r))
        .unwrap_or(next_col))
}

#[cfg(test)]
#[path = "tests/spreadsheet_tests.rs"]
mod tests;
