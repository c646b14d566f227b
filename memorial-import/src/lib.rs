//! Record extraction from tabular boat-item sources.
//!
//! Three readers share one row filter: comma-separated text, `.xlsx`
//! workbooks, and pipe tables exported from documents. Every reader yields
//! [`ItemRecord`]s in source order and reports the rows it dropped instead of
//! failing on them.

pub mod delimited;
pub mod error;
pub mod extract;
pub mod markdown;
pub mod spreadsheet;

mod row;

pub use error::ImportError;
pub use extract::{ExtractOptions, Extraction, RowDefect, SkippedRow, extract};
pub use memorial_core::{ItemRecord, SourceFormat, ValidationPolicy};
pub use spreadsheet::SheetRow;
