use std::num::NonZeroUsize;

use chrono::NaiveDate;
use memorial_core::{DistributionSummary, ItemRecord};

use crate::escape::escape_literal;

/// Target table.
pub const TABLE: &str = "memorial_okean";

/// Primary-key sequence of [`TABLE`].
pub const SEQUENCE: &str = "memorial_okean_id_seq";

/// Column list of every `INSERT`, in tuple order.
pub const COLUMNS: &[&str] = &[
    "modelo",
    "categoria",
    "descricao_item",
    "tipo_item",
    "quantidade",
    "is_customizable",
    "marca",
];

/// Tuples per `INSERT` statement unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// Constant trailing values of every tuple: item type, quantity,
/// customizable flag, brand.
const FIXED_VALUES: &str = "'Padrão', 1, true, null";

/// Options that control how the migration script is rendered.
#[derive(Debug, Clone)]
pub struct MigrationOptions {
    /// Maximum tuples per `INSERT`; `None` renders a single statement.
    pub batch_size: Option<NonZeroUsize>,
    /// Name of the source file, echoed in the header comments.
    pub source_label: Option<String>,
    /// Generation date, echoed in the header comments.
    pub generated_on: Option<NaiveDate>,
    /// Include the per-model distribution and model list as comments.
    pub include_distribution: bool,
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self {
            batch_size: NonZeroUsize::new(DEFAULT_BATCH_SIZE),
            source_label: None,
            generated_on: None,
            include_distribution: true,
        }
    }
}

impl MigrationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the batch threshold; zero means one unbounded statement.
    pub fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = NonZeroUsize::new(size);
        self
    }

    pub fn single_statement(mut self) -> Self {
        self.batch_size = None;
        self
    }

    pub fn source_label(mut self, label: impl Into<String>) -> Self {
        self.source_label = Some(label.into());
        self
    }

    pub fn generated_on(mut self, date: NaiveDate) -> Self {
        self.generated_on = Some(date);
        self
    }

    pub fn include_distribution(mut self, include: bool) -> Self {
        self.include_distribution = include;
        self
    }
}

/// Number of `INSERT` statements `n` records render to.
pub fn insert_statement_count(n: usize, batch_size: Option<NonZeroUsize>) -> usize {
    match batch_size {
        _ if n == 0 => 0,
        Some(size) => n.div_ceil(size.get()),
        None => 1,
    }
}

/// Render one record as its `VALUES` tuple.
///
/// ```
/// use memorial_core::ItemRecord;
/// use memorial_migration::render_tuple;
///
/// let record = ItemRecord::from_raw("FY550", "Casco", "Motor principal");
/// assert_eq!(
///     render_tuple(&record),
///     "('FY 550', 'Casco', 'Motor principal', 'Padrão', 1, true, null)"
/// );
/// ```
pub fn render_tuple(record: &ItemRecord) -> String {
    format!(
        "('{}', '{}', '{}', {FIXED_VALUES})",
        escape_literal(&record.model),
        escape_literal(&record.category),
        escape_literal(&record.description),
    )
}

fn insert_header() -> String {
    format!("INSERT INTO {TABLE} ({}) VALUES", COLUMNS.join(", "))
}

/// Render the full migration script.
///
/// Every record becomes exactly one tuple, in input order. Tuples are split
/// into `INSERT` statements of at most `batch_size` tuples; an empty record
/// sequence renders no `INSERT` at all.
pub fn render_migration(records: &[ItemRecord], options: &MigrationOptions) -> String {
    let summary = DistributionSummary::from_records(records);
    let total = records.len();
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("-- Migration: repopulate {TABLE} with all {total} items"));
    if options.include_distribution && !summary.is_empty() {
        lines.push(format!("-- Distribution: {summary}"));
    }
    if let Some(date) = options.generated_on {
        lines.push(format!("-- Date: {}", date.format("%Y-%m-%d")));
    }
    if let Some(label) = &options.source_label {
        lines.push(format!("-- Source: {label}"));
    }
    lines.push(String::new());

    lines.push("-- Clear existing rows".to_string());
    lines.push(format!("TRUNCATE TABLE {TABLE} CASCADE;"));
    lines.push(String::new());
    lines.push("-- Reset the id sequence".to_string());
    lines.push(format!("ALTER SEQUENCE {SEQUENCE} RESTART WITH 1;"));
    lines.push(String::new());

    let batches: Vec<&[ItemRecord]> = match options.batch_size {
        _ if records.is_empty() => Vec::new(),
        Some(size) => records.chunks(size.get()).collect(),
        None => vec![records],
    };
    let batch_count = batches.len();

    if batch_count == 0 {
        lines.push("-- No items to insert".to_string());
        lines.push(String::new());
    }

    for (i, batch) in batches.iter().enumerate() {
        if batch_count > 1 {
            lines.push(format!("-- Batch {} of {batch_count}", i + 1));
        } else {
            lines.push("-- Insert all items".to_string());
        }
        lines.push(insert_header());
        let tuples: Vec<String> = batch.iter().map(|r| format!("  {}", render_tuple(r))).collect();
        lines.push(tuples.join(",\n"));
        lines.push(";".to_string());
        lines.push(String::new());
    }

    lines.push(format!("-- Total: {total} items inserted"));
    if options.include_distribution && !summary.is_empty() {
        let models: Vec<&str> = summary.models().collect();
        lines.push(format!("-- Models: {}", models.join(", ")));
    }

    log::debug!("Rendered {total} tuple(s) in {batch_count} INSERT statement(s)");

    let mut script = lines.join("\n");
    script.push('\n');
    script
}

#[cfg(test)]
#[path = "tests/emitter_tests.rs"]
mod tests;
