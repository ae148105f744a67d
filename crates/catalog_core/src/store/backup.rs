//! Backup naming and the pre-save move.

use crate::error::{CatalogError, CatalogResult};
use std::fs;
use std::path::{Path, PathBuf};

const BACKUP_SUFFIX: &str = "_bak";

/// What the pre-save backup step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupOutcome {
    /// Previous file was moved to the backup path.
    Moved,
    /// There was no previous file to back up.
    SourceMissing,
}

/// Derives `{base}_bak.{ext}` next to `path`.
///
/// Only the file name is inspected, so dots in parent directories are fine.
///
/// # Errors
/// - `InvalidFileName` unless the file name is exactly `base.ext` with both
///   parts non-empty.
pub fn backup_path_for(path: &Path) -> CatalogResult<PathBuf> {
    let invalid = || CatalogError::InvalidFileName(path.to_path_buf());
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(invalid)?;

    let parts: Vec<&str> = file_name.split('.').collect();
    let [base, extension] = parts.as_slice() else {
        return Err(invalid());
    };
    if base.is_empty() || extension.is_empty() {
        return Err(invalid());
    }

    Ok(path.with_file_name(format!("{base}{BACKUP_SUFFIX}.{extension}")))
}

/// Moves `path` to `backup_path`, replacing an older backup.
pub fn move_to_backup(path: &Path, backup_path: &Path) -> CatalogResult<BackupOutcome> {
    let exists = path
        .try_exists()
        .map_err(|err| CatalogError::io_at(path, err))?;
    if !exists {
        return Ok(BackupOutcome::SourceMissing);
    }

    fs::rename(path, backup_path).map_err(|err| CatalogError::io_at(backup_path, err))?;
    Ok(BackupOutcome::Moved)
}
