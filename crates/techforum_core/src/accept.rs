//! Accepted-answer toggle.
//!
//! A question has at most one accepted answer, and its `isResolved` flag
//! mirrors whether the toggled answer ended up accepted.

use crate::error::AppError;
use crate::models::{can_manage, Actor, Answer, Question};
use serde::Serialize;

/// Result of an accept toggle as returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptOutcome {
    pub is_accepted: bool,
    pub question_resolved: bool,
}

/// Toggle `answer_id` among `answers` (all answers of `question`).
///
/// Mutates the rows in memory; the caller writes back the question and every
/// answer whose id is returned.
///
/// # Errors
/// - [`AppError::Forbidden`] unless `actor` may manage the question.
/// - [`AppError::NotFound`] when `answer_id` is not among `answers`.
pub fn toggle_accept(
    actor: &Actor,
    question: &mut Question,
    answers: &mut [Answer],
    answer_id: &str,
) -> Result<(AcceptOutcome, Vec<String>), AppError> {
    if !can_manage(actor, question) {
        return Err(AppError::Forbidden(
            "Only the question owner can accept answers".to_string(),
        ));
    }
    let accepted = !answers
        .iter()
        .find(|answer| answer.id == answer_id)
        .ok_or(AppError::NotFound("Answer"))?
        .is_accepted;

    let mut changed = Vec::new();
    for answer in answers.iter_mut() {
        let next = if answer.id == answer_id {
            accepted
        } else if accepted {
            false
        } else {
            answer.is_accepted
        };
        if next != answer.is_accepted {
            answer.is_accepted = next;
            changed.push(answer.id.clone());
        }
    }
    question.is_resolved = accepted;

    Ok((
        AcceptOutcome {
            is_accepted: accepted,
            question_resolved: question.is_resolved,
        },
        changed,
    ))
}
