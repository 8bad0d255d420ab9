//! Shared fixtures for unit tests.

use crate::db::Database;
use tempfile::TempDir;

pub(crate) fn setup_temp_db() -> (Database, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("forum-db");
    let db = Database::new(db_path.to_str().unwrap()).unwrap();
    (db, temp_dir)
}
