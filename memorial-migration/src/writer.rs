use std::path::Path;

use chrono::NaiveDateTime;

use crate::error::MigrationError;

/// Migration file name for a generation timestamp:
/// `20251024070000_populate_memorial_okean.sql`.
pub fn default_migration_name(timestamp: NaiveDateTime) -> String {
    format!("{}_populate_memorial_okean.sql", timestamp.format("%Y%m%d%H%M%S"))
}

/// Write a rendered script to `path`.
///
/// Parent directories are created as needed and an existing file is
/// replaced. The text goes to a sibling temp file first and is renamed into
/// place, so a failed write never leaves a truncated migration behind.
pub fn write_migration(path: &Path, script: &str) -> Result<(), MigrationError> {
    let fail = |e| MigrationError::output_write(path, e);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(fail)?;
    }

    let tmp = path.with_extension("sql.tmp");
    std::fs::write(&tmp, script).map_err(fail)?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(fail(e));
    }

    log::debug!("Wrote {} bytes to {}", script.len(), path.display());
    Ok(())
}
