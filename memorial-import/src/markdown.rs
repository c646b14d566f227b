//! Pipe-table reader for document exports of the item sheet:
//! ```text
//! # combined_boat_items.xlsx
//! |Modelo|Categoria|Descrição|
//! |-|-|-|
//! |FY550|Casco|Motor principal|
//! ```

use memorial_core::{SourceFormat, ValidationPolicy};

use crate::extract::{Extraction, RowDefect};
use crate::row::{REQUIRED_FIELDS, record_from_cells};

/// Column labels that mark the table's header row.
const MODEL_LABELS: &[&str] = &["Modelo", "Model"];
const CATEGORY_LABELS: &[&str] = &["Categoria", "Category"];

/// Split `|a|b|c|` into its cells; `None` unless the line is wrapped in pipes.
fn table_cells(line: &str) -> Option<Vec<&str>> {
    let inner = line.trim().strip_prefix('|')?.strip_suffix('|')?;
    Some(inner.split('|').collect())
}

/// `|---|:--:|` style separator rows.
fn is_separator(cells: &[&str]) -> bool {
    cells
        .iter()
        .all(|c| !c.trim().is_empty() && c.trim().chars().all(|ch| matches!(ch, '-' | ':')))
}

fn is_label_row(cells: &[&str]) -> bool {
    let first = cells.first().map(|c| c.trim()).unwrap_or("");
    let second = cells.get(1).map(|c| c.trim()).unwrap_or("");
    MODEL_LABELS.contains(&first) || CATEGORY_LABELS.contains(&second)
}

/// Parse a markdown pipe table. Headings, separator rows, label rows and
/// lines outside the table are ignored. A table row must have exactly three
/// cells; those that do go through the usual row filter.
pub fn parse_markdown_table(content: &str, skip_lines: usize, policy: ValidationPolicy) -> Extraction {
    let mut extraction = Extraction::new(SourceFormat::MarkdownTable);

    for (idx, line) in content.lines().enumerate().skip(skip_lines) {
        let line_no = idx + 1;
        if line.starts_with('#') || !line.contains('|') {
            continue;
        }
        let Some(cells) = table_cells(line) else {
            log::debug!("Ignoring markdown line {line_no}: not a table row");
            continue;
        };
        if is_separator(&cells) || is_label_row(&cells) {
            continue;
        }
        if cells.len() > REQUIRED_FIELDS {
            extraction.accept(line_no, Err(RowDefect::WrongFieldCount(cells.len())));
            continue;
        }
        extraction.accept(line_no, record_from_cells(&cells, policy));
    }

    extraction
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "\
# combined_boat_items.xlsx
## Sheet1
|Modelo|Categoria|Descrição|
|-|-|-|
|FY550|Casco|Motor principal|
|FY 670|Convés|  Guarda-mancebo em inox |
|FY720|Elétrica||
|FY850|Interior|Cama|extra|
Some trailing paragraph.
";

    #[test]
    fn reads_table_rows() {
        let ex = parse_markdown_table(DOC, 0, ValidationPolicy::RequireAll);
        let models: Vec<&str> = ex.records.iter().map(|r| r.model.as_str()).collect();
        assert_eq!(models, vec!["FY 550", "FY 670"]);
        assert_eq!(ex.records[1].description, "Guarda-mancebo em inox");
        assert_eq!(
            ex.skipped.iter().map(|s| (s.line, s.defect.clone())).collect::<Vec<_>>(),
            vec![
                (7, RowDefect::MissingField("description")),
                (8, RowDefect::WrongFieldCount(4)),
            ]
        );
    }

    #[test]
    fn model_only_keeps_empty_cells() {
        let ex = parse_markdown_table(DOC, 0, ValidationPolicy::ModelOnly);
        assert_eq!(ex.records.len(), 3);
    }

    #[test]
    fn extra_cells_reject_the_row() {
        for policy in [ValidationPolicy::RequireAll, ValidationPolicy::ModelOnly] {
            let ex = parse_markdown_table("|FY850|Interior|Cama|extra|\n", 0, policy);
            assert!(ex.records.is_empty());
            assert_eq!(ex.skipped[0].defect, RowDefect::WrongFieldCount(4));
        }
    }

    #[test]
    fn separator_variants() {
        assert!(is_separator(&["---", ":--:", " - "]));
        assert!(!is_separator(&["FY550", "-", "-"]));
        assert!(!is_separator(&["", ""]));
    }

    #[test]
    fn short_rows_are_skipped() {
        let ex = parse_markdown_table("|FY550|Casco|\n", 0, ValidationPolicy::RequireAll);
        assert!(ex.records.is_empty());
        assert_eq!(ex.skipped[0].defect, RowDefect::TooFewFields(2));
    }

    #[test]
    fn explicit_skip_drops_leading_lines() {
        let ex = parse_markdown_table("|FY550|Casco|Motor|\n|FY670|Casco|Motor|\n", 1, ValidationPolicy::RequireAll);
        assert_eq!(ex.records.len(), 1);
        assert_eq!(ex.records[0].model, "FY 670");
    }
}
