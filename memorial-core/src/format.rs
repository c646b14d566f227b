use std::path::Path;

use serde::{Deserialize, Serialize};

/// Layout of a tabular source file.
///
/// Each format carries the number of leading header lines/rows that precede
/// the data and the file extensions it is detected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// Comma-separated text with `"`-quoted fields.
    Delimited,
    /// An `.xlsx` workbook; the active sheet is read.
    Spreadsheet,
    /// A pipe table (`|Modelo|Categoria|Descrição|`) from a document export.
    MarkdownTable,
}

const ALL_FORMATS: &[SourceFormat] = &[
    SourceFormat::Delimited,
    SourceFormat::Spreadsheet,
    SourceFormat::MarkdownTable,
];

impl SourceFormat {
    /// Canonical short name used on the command line and in settings.
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Delimited => "csv",
            Self::Spreadsheet => "xlsx",
            Self::MarkdownTable => "markdown",
        }
    }

    /// Alternative names accepted when parsing.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Delimited => &["csv", "delimited", "text", "txt"],
            Self::Spreadsheet => &["xlsx", "spreadsheet", "excel", "xlsm"],
            Self::MarkdownTable => &["markdown", "md", "table", "markdown-table"],
        }
    }

    /// File extensions (lowercase, no dot) that imply this format.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Delimited => &["csv", "txt"],
            Self::Spreadsheet => &["xlsx", "xlsm"],
            Self::MarkdownTable => &["md", "markdown"],
        }
    }

    /// Header lines (delimited) or rows (spreadsheet) to skip before data.
    ///
    /// The markdown reader recognizes its label row instead of counting.
    pub fn header_rows(&self) -> usize {
        match self {
            Self::Delimited => 3,
            Self::Spreadsheet => 1,
            Self::MarkdownTable => 0,
        }
    }

    /// Guess the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        ALL_FORMATS
            .iter()
            .copied()
            .find(|f| f.extensions().contains(&ext.as_str()))
    }

    pub fn all() -> &'static [SourceFormat] {
        ALL_FORMATS
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Which fields must be non-empty for a row to become a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationPolicy {
    /// Model, category and description are all required.
    #[default]
    #[serde(alias = "all")]
    RequireAll,
    /// Only the model is required.
    ModelOnly,
}

impl ValidationPolicy {
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::RequireAll => "all",
            Self::ModelOnly => "model-only",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::RequireAll => &["all", "require-all", "strict"],
            Self::ModelOnly => &["model-only", "model", "lenient"],
        }
    }
}

impl std::fmt::Display for ValidationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Error returned when a string names no known format or policy.
#[derive(Debug, Clone)]
pub struct FormatParseError {
    pub kind: &'static str,
    pub value: String,
}

impl std::fmt::Display for FormatParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {}: '{}'", self.kind, self.value)
    }
}

impl std::error::Error for FormatParseError {}

impl std::str::FromStr for SourceFormat {
    type Err = FormatParseError;

    /// Case-insensitive match against `short_name()` and `aliases()`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        ALL_FORMATS
            .iter()
            .copied()
            .find(|f| f.aliases().contains(&lower.as_str()))
            .ok_or_else(|| FormatParseError {
                kind: "source format",
                value: s.to_string(),
            })
    }
}

impl std::str::FromStr for ValidationPolicy {
    type Err = FormatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        [Self::RequireAll, Self::ModelOnly]
            .into_iter()
            .find(|p| p.aliases().contains(&lower.as_str()))
            .ok_or_else(|| FormatParseError {
                kind: "validation policy",
                value: s.to_string(),
            })
    }
}
