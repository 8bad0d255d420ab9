//! Atomic cross-table transaction helpers.
//!
//! Every operation here reads, checks and writes inside one redb write
//! transaction. Returning early drops the transaction, which aborts it, so a
//! failed check never leaves counters half-updated.

use super::rows::{load, remove, scan, store, WriteTable};
use super::tables::{ANSWERS, CATEGORIES, QUESTIONS};
use super::Database;
use crate::accept::{self, AcceptOutcome};
use crate::error::AppError;
use crate::models::question::{apply_content_update, UpdateQuestionRequest};
use crate::models::{can_manage, Actor, Answer, Category, Question};
use chrono::Utc;
use redb::ReadableTable;

/// Atomic operations that keep questions, answers and category counts in step.
pub struct TransactionOps;

fn invalid_category() -> AppError {
    AppError::BadRequest("Invalid category".to_string())
}

fn adjust_question_count(
    categories: &mut WriteTable<'_>,
    category_id: &str,
    delta: i64,
) -> Result<(), AppError> {
    let Some(mut category) = load::<Category>(&*categories, category_id)? else {
        tracing::warn!(
            "Category '{}' missing while adjusting question count by {}",
            category_id,
            delta
        );
        return Ok(());
    };
    category.question_count = if delta >= 0 {
        category.question_count.saturating_add(delta.unsigned_abs())
    } else {
        category.question_count.saturating_sub(delta.unsigned_abs())
    };
    store(categories, category_id, &category)
}

fn load_question(questions: &WriteTable<'_>, id: &str) -> Result<Question, AppError> {
    load(questions, id)?.ok_or(AppError::NotFound("Question"))
}

fn load_answer(answers: &WriteTable<'_>, id: &str) -> Result<Answer, AppError> {
    load(answers, id)?.ok_or(AppError::NotFound("Answer"))
}

impl TransactionOps {
    /// Insert a question and bump its category's question count.
    ///
    /// # Errors
    /// - [`AppError::BadRequest`] when the category does not exist.
    /// - Storage errors when the write fails.
    pub fn create_question(db: &Database, question: &Question) -> Result<(), AppError> {
        let write_txn = db.db.begin_write()?;
        {
            let mut questions = write_txn.open_table(QUESTIONS)?;
            let mut categories = write_txn.open_table(CATEGORIES)?;

            if load::<Category>(&categories, &question.category_id)?.is_none() {
                return Err(invalid_category());
            }
            if questions.get(question.id.as_str())?.is_some() {
                return Err(AppError::StorageMessage(format!(
                    "Question id '{}' already exists",
                    question.id
                )));
            }

            adjust_question_count(&mut categories, &question.category_id, 1)?;
            store(&mut questions, &question.id, question)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Apply a partial question update on behalf of `actor`.
    ///
    /// Moving to another category moves one unit of `question_count` with it.
    ///
    /// # Returns
    /// The updated question.
    ///
    /// # Errors
    /// - [`AppError::NotFound`] when the question does not exist.
    /// - [`AppError::Forbidden`] when `actor` may not manage it, or a non-staff
    ///   actor sets `isPinned`/`isLocked`.
    /// - [`AppError::BadRequest`] when the new category does not exist.
    pub fn update_question(
        db: &Database,
        actor: &Actor,
        id: &str,
        update: &UpdateQuestionRequest,
    ) -> Result<Question, AppError> {
        let write_txn = db.db.begin_write()?;
        let updated = {
            let mut questions = write_txn.open_table(QUESTIONS)?;
            let mut categories = write_txn.open_table(CATEGORIES)?;

            let mut question = load_question(&questions, id)?;
            if !can_manage(actor, &question) {
                return Err(AppError::Forbidden(
                    "Not authorized to update this question".to_string(),
                ));
            }
            if (update.is_pinned.is_some() || update.is_locked.is_some()) && !actor.is_staff() {
                return Err(AppError::Forbidden(
                    "Only moderators can pin or lock questions".to_string(),
                ));
            }

            if let Some(category_id) = update.category_id.as_deref().map(str::trim) {
                if category_id != question.category_id {
                    if load::<Category>(&categories, category_id)?.is_none() {
                        return Err(invalid_category());
                    }
                    adjust_question_count(&mut categories, &question.category_id, -1)?;
                    adjust_question_count(&mut categories, category_id, 1)?;
                    question.category_id = category_id.to_string();
                }
            }
            if let Some(is_pinned) = update.is_pinned {
                question.is_pinned = is_pinned;
            }
            if let Some(is_locked) = update.is_locked {
                question.is_locked = is_locked;
            }
            apply_content_update(&mut question, update);

            store(&mut questions, id, &question)?;
            question
        };
        write_txn.commit()?;
        Ok(updated)
    }

    /// Delete a question with all of its answers and decrement its category.
    ///
    /// # Returns
    /// The number of answers removed with it.
    ///
    /// # Errors
    /// - [`AppError::NotFound`] when the question does not exist.
    /// - [`AppError::Forbidden`] when `actor` may not manage it.
    pub fn delete_question(db: &Database, actor: &Actor, id: &str) -> Result<usize, AppError> {
        let write_txn = db.db.begin_write()?;
        let removed_answers = {
            let mut questions = write_txn.open_table(QUESTIONS)?;
            let mut answers = write_txn.open_table(ANSWERS)?;
            let mut categories = write_txn.open_table(CATEGORIES)?;

            let question = load_question(&questions, id)?;
            if !can_manage(actor, &question) {
                return Err(AppError::Forbidden(
                    "Not authorized to delete this question".to_string(),
                ));
            }

            // Scan rather than trust `question.answers` so no orphan survives.
            let children: Vec<Answer> = scan(&answers, |a: &Answer| a.question_id == id)?;
            for answer in &children {
                remove(&mut answers, &answer.id)?;
            }
            adjust_question_count(&mut categories, &question.category_id, -1)?;
            remove(&mut questions, id)?;
            children.len()
        };
        write_txn.commit()?;
        tracing::info!(
            "Deleted question {} and {} answer(s)",
            id,
            removed_answers
        );
        Ok(removed_answers)
    }

    /// Insert an answer and append it to its question.
    ///
    /// # Errors
    /// - [`AppError::NotFound`] when the question does not exist.
    /// - [`AppError::BadRequest`] when the question is locked.
    pub fn create_answer(db: &Database, answer: &Answer) -> Result<(), AppError> {
        let write_txn = db.db.begin_write()?;
        {
            let mut questions = write_txn.open_table(QUESTIONS)?;
            let mut answers = write_txn.open_table(ANSWERS)?;

            let mut question = load_question(&questions, &answer.question_id)?;
            if question.is_locked {
                return Err(AppError::BadRequest(
                    "Question is locked and cannot accept new answers".to_string(),
                ));
            }
            if answers.get(answer.id.as_str())?.is_some() {
                return Err(AppError::StorageMessage(format!(
                    "Answer id '{}' already exists",
                    answer.id
                )));
            }

            question.answers.push(answer.id.clone());
            question.updated_at = Utc::now();
            store(&mut answers, &answer.id, answer)?;
            store(&mut questions, &question.id, &question)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Replace an answer's content and bump its question's `updated_at`.
    ///
    /// # Errors
    /// - [`AppError::NotFound`] when the answer does not exist.
    /// - [`AppError::Forbidden`] when `actor` may not manage it.
    pub fn update_answer(
        db: &Database,
        actor: &Actor,
        id: &str,
        content: &str,
    ) -> Result<Answer, AppError> {
        let write_txn = db.db.begin_write()?;
        let updated = {
            let mut questions = write_txn.open_table(QUESTIONS)?;
            let mut answers = write_txn.open_table(ANSWERS)?;

            let mut answer = load_answer(&answers, id)?;
            if !can_manage(actor, &answer) {
                return Err(AppError::Forbidden(
                    "Not authorized to update this answer".to_string(),
                ));
            }
            let now = Utc::now();
            answer.content = content.to_string();
            answer.updated_at = now;
            store(&mut answers, id, &answer)?;

            if let Some(mut question) = load::<Question>(&questions, &answer.question_id)? {
                question.updated_at = now;
                store(&mut questions, &question.id, &question)?;
            }
            answer
        };
        write_txn.commit()?;
        Ok(updated)
    }

    /// Delete an answer, detach it from its question and unresolve the
    /// question when the answer was the accepted one.
    ///
    /// # Errors
    /// - [`AppError::NotFound`] when the answer does not exist.
    /// - [`AppError::Forbidden`] when `actor` may not manage it.
    pub fn delete_answer(db: &Database, actor: &Actor, id: &str) -> Result<(), AppError> {
        let write_txn = db.db.begin_write()?;
        {
            let mut questions = write_txn.open_table(QUESTIONS)?;
            let mut answers = write_txn.open_table(ANSWERS)?;

            let answer = load_answer(&answers, id)?;
            if !can_manage(actor, &answer) {
                return Err(AppError::Forbidden(
                    "Not authorized to delete this answer".to_string(),
                ));
            }
            if let Some(mut question) = load::<Question>(&questions, &answer.question_id)? {
                question.answers.retain(|answer_id| answer_id != id);
                if answer.is_accepted {
                    question.is_resolved = false;
                }
                store(&mut questions, &question.id, &question)?;
            }
            remove(&mut answers, id)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Toggle whether an answer is the accepted one for its question.
    ///
    /// # Errors
    /// - [`AppError::NotFound`] when the answer or its question does not exist.
    /// - [`AppError::Forbidden`] unless `actor` owns the question or is staff.
    pub fn toggle_accept(
        db: &Database,
        actor: &Actor,
        answer_id: &str,
    ) -> Result<AcceptOutcome, AppError> {
        let write_txn = db.db.begin_write()?;
        let outcome = {
            let mut questions = write_txn.open_table(QUESTIONS)?;
            let mut answers = write_txn.open_table(ANSWERS)?;

            let target = load_answer(&answers, answer_id)?;
            let mut question = load_question(&questions, &target.question_id)?;
            let mut siblings: Vec<Answer> =
                scan(&answers, |a: &Answer| a.question_id == question.id)?;

            let (outcome, changed) =
                accept::toggle_accept(actor, &mut question, &mut siblings, answer_id)?;
            for answer in siblings.iter().filter(|a| changed.contains(&a.id)) {
                store(&mut answers, &answer.id, answer)?;
            }
            store(&mut questions, &question.id, &question)?;
            outcome
        };
        write_txn.commit()?;
        Ok(outcome)
    }
}
