//! Data model shared by the memorial extractor and migration emitter.
//!
//! This crate has no I/O: it defines the item record, the per-model
//! distribution summary, the source format and validation policy knobs, and
//! the field normalization rules applied to every source format.

pub mod format;
pub mod normalize;
pub mod record;

pub use format::{FormatParseError, SourceFormat, ValidationPolicy};
pub use normalize::{clean_category, clean_description, normalize_model};
pub use record::{DistributionSummary, ItemRecord};
