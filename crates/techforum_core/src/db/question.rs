//! Question reads, listing, views and votes.

use super::rows::{load, scan, store};
use super::tables::{ANSWERS, CATEGORIES, QUESTIONS};
use super::votes::vote_in_txn;
use crate::error::AppError;
use crate::listing::ListingQuery;
use crate::models::answer::display_order;
use crate::models::category::CategoryBrief;
use crate::models::question::{QuestionDetail, QuestionSummary};
use crate::models::{Answer, Category, Question, VoteType};
use crate::pagination::PageRequest;
use crate::voting::VoteOutcome;
use redb::ReadableDatabase;
use std::collections::HashMap;
use std::sync::Arc;

/// Accessor for the `questions` table.
pub struct QuestionDb {
    db: Arc<redb::Database>,
}

impl QuestionDb {
    /// Create the `questions` table if it does not exist yet.
    ///
    /// # Errors
    /// Returns an error when redb transaction/table initialization fails.
    pub fn new(db: Arc<redb::Database>) -> Result<Self, AppError> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(QUESTIONS)?;
        write_txn.commit()?;
        Ok(Self { db })
    }

    /// Fetch a question by id without touching its view counter.
    pub fn get(&self, id: &str) -> Result<Option<Question>, AppError> {
        let read_txn = self.db.begin_read()?;
        let questions = read_txn.open_table(QUESTIONS)?;
        load(&questions, id)
    }

    /// Run a listing query over all questions.
    ///
    /// Every row carries its answer count and a brief of its category, read
    /// from the same snapshot as the questions.
    ///
    /// # Returns
    /// The requested page and the number of questions matching the filter.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn listing(
        &self,
        query: &ListingQuery,
        page: &PageRequest,
    ) -> Result<(Vec<QuestionSummary>, u64), AppError> {
        let read_txn = self.db.begin_read()?;
        let questions = read_txn.open_table(QUESTIONS)?;
        let categories = read_txn.open_table(CATEGORIES)?;
        let matching: Vec<Question> = scan(&questions, |q: &Question| query.matches(q))?;
        let (rows, total) = query.run(matching, page);

        let mut briefs: HashMap<String, Option<CategoryBrief>> = HashMap::new();
        let mut summaries = Vec::with_capacity(rows.len());
        for question in rows {
            let brief = match briefs.get(&question.category_id) {
                Some(brief) => brief.clone(),
                None => {
                    let brief = load::<Category>(&categories, &question.category_id)?
                        .as_ref()
                        .map(CategoryBrief::from);
                    briefs.insert(question.category_id.clone(), brief.clone());
                    brief
                }
            };
            summaries.push(QuestionSummary::new(question, brief));
        }
        Ok((summaries, total))
    }

    /// Load a question for display, counting the view, together with its
    /// answers in display order.
    ///
    /// The view counts unless `viewer` owns the question; anonymous views
    /// always count.
    ///
    /// # Returns
    /// `Ok(None)` when the question does not exist.
    ///
    /// # Errors
    /// Returns an error when storage access or (de)serialization fails.
    pub fn view(&self, id: &str, viewer: Option<&str>) -> Result<Option<QuestionDetail>, AppError> {
        let write_txn = self.db.begin_write()?;
        let detail = {
            let mut questions = write_txn.open_table(QUESTIONS)?;
            let answers = write_txn.open_table(ANSWERS)?;
            let Some(mut question) = load::<Question>(&questions, id)? else {
                return Ok(None);
            };
            if viewer != Some(question.user_id.as_str()) {
                question.views = question.views.saturating_add(1);
                store(&mut questions, id, &question)?;
            }

            let mut rows = Vec::with_capacity(question.answers.len());
            for answer_id in &question.answers {
                if let Some(answer) = load::<Answer>(&answers, answer_id)? {
                    rows.push(answer);
                }
            }
            rows.sort_by(display_order);
            QuestionDetail {
                answer_count: question.answer_count(),
                question,
                answers: rows,
            }
        };
        write_txn.commit()?;
        Ok(Some(detail))
    }

    /// Toggle `actor_id`'s vote on a question.
    ///
    /// # Errors
    /// - [`AppError::NotFound`] when the question does not exist.
    /// - [`AppError::Forbidden`] when `actor_id` asked the question.
    pub fn vote(
        &self,
        id: &str,
        actor_id: &str,
        vote_type: VoteType,
    ) -> Result<VoteOutcome, AppError> {
        vote_in_txn::<Question>(&self.db, QUESTIONS, "Question", id, actor_id, vote_type)
    }
}
