use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use memorial_core::{DistributionSummary, ItemRecord, SourceFormat, ValidationPolicy};

use crate::error::ImportError;
use crate::{delimited, markdown, spreadsheet};

/// Options that control how a source file is read.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub format: SourceFormat,
    pub policy: ValidationPolicy,
    /// Overrides [`SourceFormat::header_rows`] when set.
    pub header_rows: Option<usize>,
}

impl ExtractOptions {
    pub fn new(format: SourceFormat) -> Self {
        Self {
            format,
            policy: ValidationPolicy::default(),
            header_rows: None,
        }
    }

    pub fn policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn header_rows(mut self, rows: usize) -> Self {
        self.header_rows = Some(rows);
        self
    }

    /// Header rows actually skipped for this run.
    pub fn effective_header_rows(&self) -> usize {
        self.header_rows.unwrap_or_else(|| self.format.header_rows())
    }
}

/// Why a source row did not become a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowDefect {
    /// Nothing but whitespace and delimiters.
    Blank,
    /// Fewer than three positional fields.
    TooFewFields(usize),
    /// A table row that does not have exactly three cells.
    WrongFieldCount(usize),
    /// First field empty after trimming.
    EmptyModel,
    /// A field the validation policy requires is empty.
    MissingField(&'static str),
    /// The row could not be decoded at all.
    Unreadable(String),
}

impl std::fmt::Display for RowDefect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blank => f.write_str("blank row"),
            Self::TooFewFields(n) => write!(f, "only {n} field(s)"),
            Self::WrongFieldCount(n) => write!(f, "{n} cells, expected 3"),
            Self::EmptyModel => f.write_str("empty model"),
            Self::MissingField(field) => write!(f, "empty {field}"),
            Self::Unreadable(msg) => write!(f, "unreadable: {msg}"),
        }
    }
}

/// A dropped row and where it was in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line (text formats) or sheet row number.
    pub line: usize,
    pub defect: RowDefect,
}

/// Result of reading one source file.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub format: SourceFormat,
    /// Accepted records, in source order.
    pub records: Vec<ItemRecord>,
    /// Rows that were dropped, in source order.
    pub skipped: Vec<SkippedRow>,
}

impl Extraction {
    pub(crate) fn new(format: SourceFormat) -> Self {
        Self {
            format,
            records: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Record the outcome of one row.
    pub(crate) fn accept(&mut self, line: usize, row: Result<ItemRecord, RowDefect>) {
        match row {
            Ok(record) => self.records.push(record),
            Err(defect) => {
                // Blank lines are routine in exports; keep them out of the log
                if defect != RowDefect::Blank {
                    log::debug!("Skipping {} row {line}: {defect}", self.format);
                }
                self.skipped.push(SkippedRow { line, defect });
            }
        }
    }

    /// Per-model counts of the accepted records.
    pub fn distribution(&self) -> DistributionSummary {
        DistributionSummary::from_records(&self.records)
    }

    /// Skipped rows other than blank ones.
    pub fn defects(&self) -> impl Iterator<Item = &SkippedRow> {
        self.skipped.iter().filter(|s| s.defect != RowDefect::Blank)
    }
}

/// Read a source file into normalized records.
///
/// Fails with [`ImportError::SourceNotFound`] before touching the file when
/// the path does not exist. Malformed rows are skipped, never fatal.
pub fn extract(path: &Path, options: &ExtractOptions) -> Result<Extraction, ImportError> {
    if !path.exists() {
        return Err(ImportError::SourceNotFound(path.to_path_buf()));
    }

    let header_rows = options.effective_header_rows();
    log::debug!(
        "Reading {} as {} (skipping {} header row(s), policy {})",
        path.display(),
        options.format,
        header_rows,
        options.policy,
    );

    let extraction = match options.format {
        SourceFormat::Delimited => {
            let bytes = std::fs::read(path)?;
            delimited::parse_delimited(&bytes, header_rows, options.policy)
        }
        SourceFormat::Spreadsheet => {
            let file = BufReader::new(File::open(path)?);
            let rows = spreadsheet::read_active_sheet(file)?;
            spreadsheet::rows_to_records(&rows, header_rows, options.policy)
        }
        SourceFormat::MarkdownTable => {
            let bytes = std::fs::read(path)?;
            let content = String::from_utf8_lossy(&bytes);
            markdown::parse_markdown_table(&content, header_rows, options.policy)
        }
    };

    log::debug!(
        "Extracted {} record(s), skipped {} row(s)",
        extraction.records.len(),
        extraction.skipped.len(),
    );
    Ok(extraction)
}
