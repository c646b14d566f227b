use memorial_core::{ItemRecord, ValidationPolicy};

use crate::extract::RowDefect;

/// Minimum number of positional fields a row must resolve to.
pub(crate) const REQUIRED_FIELDS: usize = 3;

/// Turn the positional cells of one source row into a record.
///
/// Cells past the third are ignored.
pub(crate) fn record_from_cells(
    cells: &[&str],
    policy: ValidationPolicy,
) -> Result<ItemRecord, RowDefect> {
    if cells.iter().all(|c| c.trim().is_empty()) {
        return Err(RowDefect::Blank);
    }
    if cells.len() < REQUIRED_FIELDS {
        return Err(RowDefect::TooFewFields(cells.len()));
    }
    if cells[0].trim().is_empty() {
        return Err(RowDefect::EmptyModel);
    }

    let record = ItemRecord::from_raw(cells[0], cells[1], cells[2]);
    match record.missing_field(policy) {
        Some(field) => Err(RowDefect::MissingField(field)),
        None => Ok(record),
    }
}
