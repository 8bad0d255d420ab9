//! Database layer and transactional helpers for TechForum.

/// Answer storage helpers.
pub mod answer;
/// Backup utilities.
pub mod backup;
/// Category storage helpers.
pub mod category;
/// Question storage helpers.
pub mod question;
/// Table definitions.
pub mod tables;
/// Atomic multi-table mutations.
pub mod transactions;

mod rows;
mod time_util;
mod votes;

pub use transactions::TransactionOps;

use crate::constants::RECENT_ACTIVITY_LIMIT;
use crate::error::AppError;
use crate::listing::ListingQuery;
use crate::models::activity::{RecentActivity, UserActivity, UserStats};
use crate::pagination::PageRequest;
use std::path::Path;
use std::sync::Arc;
use tables::REDB_FILE_NAME;

/// Database handle with typed accessors for each table.
pub struct Database {
    pub db: Arc<redb::Database>,
    pub questions: question::QuestionDb,
    pub answers: answer::AnswerDb,
    pub categories: category::CategoryDb,
}

#[cfg(test)]
mod tests;

impl Database {
    /// Build a database handle from an already-open redb instance.
    ///
    /// # Returns
    /// A new [`Database`] wrapper that shares the underlying redb instance.
    ///
    /// # Errors
    /// Returns an error if the tables cannot be created.
    pub fn from_shared(db: Arc<redb::Database>) -> Result<Self, AppError> {
        Ok(Self {
            questions: question::QuestionDb::new(db.clone())?,
            answers: answer::AnswerDb::new(db.clone())?,
            categories: category::CategoryDb::new(db.clone())?,
            db,
        })
    }

    /// Clone this handle for another thread or subsystem in the same process.
    ///
    /// redb allows one open handle per file, so sharing is the only way to
    /// reach the same database twice.
    ///
    /// # Errors
    /// Returns an error if table initialization fails.
    pub fn share(&self) -> Result<Self, AppError> {
        Self::from_shared(self.db.clone())
    }

    /// Open (or create) the database under the `path` directory.
    ///
    /// # Returns
    /// A fully initialized [`Database`].
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created, the file is held
    /// by another process, or the tables cannot be created.
    pub fn new(path: &str) -> Result<Self, AppError> {
        let dir = Path::new(path);
        std::fs::create_dir_all(dir).map_err(|err| {
            AppError::StorageMessage(format!(
                "Failed to create database directory {:?}: {}",
                dir, err
            ))
        })?;

        let file = dir.join(REDB_FILE_NAME);
        let db = match redb::Database::create(&file) {
            Ok(db) => db,
            Err(redb::DatabaseError::DatabaseAlreadyOpen) => {
                return Err(AppError::StorageMessage(format!(
                    "Database {:?} is already open in another TechForum process.\n\
                    Stop it first, or set DB_PATH to use a different database location.",
                    file
                )));
            }
            Err(err) => return Err(err.into()),
        };
        tracing::debug!("Opened database at {:?}", file);
        Self::from_shared(Arc::new(db))
    }

    /// Contribution counts and the newest questions and answers of `user_id`.
    ///
    /// Unknown users get zero counts and empty lists; there is no user table.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn user_activity(&self, user_id: &str) -> Result<UserActivity, AppError> {
        let recent = PageRequest::new(Some(1), Some(RECENT_ACTIVITY_LIMIT));
        let (questions, questions_asked) = self
            .questions
            .listing(&ListingQuery::by_author(user_id), &recent)?;
        let (answers, answers_given) = self.answers.list_by_author(user_id, &recent)?;
        Ok(UserActivity {
            user_id: user_id.to_string(),
            stats: UserStats {
                questions_asked,
                answers_given,
            },
            recent_activity: RecentActivity { questions, answers },
        })
    }
}
