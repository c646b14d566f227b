use std::path::PathBuf;

/// Fatal errors while reading a source file.
///
/// Row-level problems are not errors; they are collected as
/// [`SkippedRow`](crate::SkippedRow)s.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Source file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Zip archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("Invalid workbook: {0}")]
    InvalidWorkbook(String),
}

impl ImportError {
    pub fn invalid_workbook(msg: impl Into<String>) -> Self {
        Self::InvalidWorkbook(msg.into())
    }
}
