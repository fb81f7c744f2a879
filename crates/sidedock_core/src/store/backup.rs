//! Data file backup and restore.
//!
//! # Responsibility
//! - Copy the live data file to the backup path byte for byte.
//! - Overwrite the live data file from the backup on request.
//!
//! # Invariants
//! - Restore fails with `BackupMissing` and leaves the data file untouched
//!   when no backup exists.

use super::{StoreError, StoreResult};
use log::{error, info};
use std::path::Path;
use std::time::Duration;

/// Interval between automatic backups.
pub const BACKUP_INTERVAL: Duration = Duration::from_secs(600);

/// Copies `data_file` to `backup_file`.
///
/// Returns `Ok(false)` when there is no data file to copy yet.
pub fn create_backup(data_file: &Path, backup_file: &Path) -> StoreResult<bool> {
    if !data_file.exists() {
        info!("event=backup_create module=backup status=skipped reason=no_data_file");
        return Ok(false);
    }
    match std::fs::copy(data_file, backup_file) {
        Ok(bytes) => {
            info!("event=backup_create module=backup status=ok bytes={bytes}");
            Ok(true)
        }
        Err(err) => {
            error!("event=backup_create module=backup status=error error={err}");
            Err(StoreError::io(backup_file, err))
        }
    }
}

/// Overwrites `data_file` with the contents of `backup_file`.
pub fn restore_from_backup(backup_file: &Path, data_file: &Path) -> StoreResult<()> {
    if !backup_file.exists() {
        error!("event=backup_restore module=backup status=error error_code=backup_missing");
        return Err(StoreError::BackupMissing(backup_file.to_path_buf()));
    }
    match std::fs::copy(backup_file, data_file) {
        Ok(bytes) => {
            info!("event=backup_restore module=backup status=ok bytes={bytes}");
            Ok(())
        }
        Err(err) => {
            error!("event=backup_restore module=backup status=error error={err}");
            Err(StoreError::io(data_file, err))
        }
    }
}
