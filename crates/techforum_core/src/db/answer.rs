//! Answer reads and votes.

use super::rows::{load, scan};
use super::tables::ANSWERS;
use super::votes::vote_in_txn;
use crate::error::AppError;
use crate::models::{Answer, VoteType};
use crate::pagination::PageRequest;
use crate::voting::VoteOutcome;
use redb::ReadableDatabase;
use std::sync::Arc;

/// Accessor for the `answers` table.
pub struct AnswerDb {
    db: Arc<redb::Database>,
}

impl AnswerDb {
    /// Create the `answers` table if it does not exist yet.
    ///
    /// # Errors
    /// Returns an error when redb transaction/table initialization fails.
    pub fn new(db: Arc<redb::Database>) -> Result<Self, AppError> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(ANSWERS)?;
        write_txn.commit()?;
        Ok(Self { db })
    }

    pub fn get(&self, id: &str) -> Result<Option<Answer>, AppError> {
        let read_txn = self.db.begin_read()?;
        let answers = read_txn.open_table(ANSWERS)?;
        load(&answers, id)
    }

    /// One page of answers written by `user_id`, newest first.
    ///
    /// # Returns
    /// The page and the author's total answer count.
    pub fn list_by_author(
        &self,
        user_id: &str,
        page: &PageRequest,
    ) -> Result<(Vec<Answer>, u64), AppError> {
        let read_txn = self.db.begin_read()?;
        let answers = read_txn.open_table(ANSWERS)?;
        let mut rows: Vec<Answer> = scan(&answers, |a: &Answer| a.user_id == user_id)?;
        let total = rows.len() as u64;
        rows.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        let skip = usize::try_from(page.skip()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit).unwrap_or(usize::MAX);
        Ok((rows.into_iter().skip(skip).take(limit).collect(), total))
    }

    /// Toggle `actor_id`'s vote on an answer.
    ///
    /// # Errors
    /// - [`AppError::NotFound`] when the answer does not exist.
    /// - [`AppError::Forbidden`] when `actor_id` wrote the answer.
    pub fn vote(
        &self,
        id: &str,
        actor_id: &str,
        vote_type: VoteType,
    ) -> Result<VoteOutcome, AppError> {
        vote_in_txn::<Answer>(&self.db, ANSWERS, "Answer", id, actor_id, vote_type)
    }
}
