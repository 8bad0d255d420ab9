//! Backup helper for the redb database file.

use super::tables::REDB_FILE_NAME;
use super::time_util::unix_timestamp_seconds;
use crate::error::AppError;
use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;

/// Copies the database file into a timestamped sibling directory.
pub struct BackupManager {
    db_path: PathBuf,
}

impl BackupManager {
    /// Create a backup manager for the database directory.
    pub fn new(db_path: &str) -> Self {
        Self {
            db_path: PathBuf::from(db_path),
        }
    }

    /// Copy `<db_path>/data.redb` to `<db_path>.backup.<unix-seconds>/data.redb`.
    ///
    /// Run this while no process has the database open; the result can be
    /// used directly as a `DB_PATH`.
    ///
    /// # Returns
    /// The backup directory, or an empty string when there is no database
    /// file yet.
    ///
    /// # Errors
    /// Returns an error when the clock is before the epoch or copying fails.
    pub fn create_backup(&self) -> Result<String, AppError> {
        let source = self.db_path.join(REDB_FILE_NAME);
        if !source.exists() {
            return Ok(String::new());
        }

        let timestamp = unix_timestamp_seconds(SystemTime::now())?;
        let mut backup_name = self.db_path.clone().into_os_string();
        backup_name.push(format!(".backup.{}", timestamp));
        let backup_dir = PathBuf::from(backup_name);

        fs::create_dir_all(&backup_dir).map_err(|err| {
            AppError::StorageMessage(format!("Failed to create backup directory: {}", err))
        })?;
        fs::copy(&source, backup_dir.join(REDB_FILE_NAME)).map_err(|err| {
            AppError::StorageMessage(format!("Failed to copy {:?}: {}", source, err))
        })?;

        tracing::info!("Created database backup at: {:?}", backup_dir);
        Ok(backup_dir.to_string_lossy().to_string())
    }
}
