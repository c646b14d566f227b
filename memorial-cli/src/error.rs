use std::path::PathBuf;

use thiserror::Error;

use memorial_import::ImportError;
use memorial_migration::MigrationError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Reading the source file failed
    #[error("{0}")]
    Import(#[from] ImportError),

    /// Writing the migration failed
    #[error("{0}")]
    Migration(#[from] MigrationError),

    /// Source format could not be detected
    #[error("Cannot tell the format of {}; pass --format (csv, xlsx, markdown)", .0.display())]
    UnknownFormat(PathBuf),

    /// Console I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Settings file error
    #[error("Config error: {0}")]
    Config(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
