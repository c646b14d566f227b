use std::path::PathBuf;

/// Errors that can occur while persisting a migration script.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Failed to write {}: {source}", path.display())]
    OutputWriteFailure {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl MigrationError {
    pub fn output_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputWriteFailure {
            path: path.into(),
            source,
        }
    }
}
