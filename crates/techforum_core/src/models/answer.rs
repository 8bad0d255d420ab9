//! Answer rows and API payloads.

use super::{new_id, Owned, VoteDetail};
use crate::voting::Votable;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Answer stored in the database and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub id: String,
    pub content: String,
    pub question_id: String,
    pub user_id: String,
    pub votes: i64,
    pub is_accepted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub votes_detail: VoteDetail,
}

/// Request payload for answering a question.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnswerRequest {
    pub question_id: String,
    pub content: String,
}

/// Request payload for editing an answer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAnswerRequest {
    pub content: String,
}

impl Answer {
    pub fn new(content: String, question_id: String, user_id: String) -> Self {
        let now = Utc::now();
        Self {
            id: new_id("a"),
            content,
            question_id,
            user_id,
            votes: 0,
            is_accepted: false,
            created_at: now,
            updated_at: now,
            votes_detail: VoteDetail::default(),
        }
    }
}

/// Display order under a question: accepted first, then votes, then newest.
pub fn display_order(a: &Answer, b: &Answer) -> Ordering {
    b.is_accepted
        .cmp(&a.is_accepted)
        .then_with(|| b.votes.cmp(&a.votes))
        .then_with(|| b.created_at.cmp(&a.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

impl Owned for Answer {
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}

impl Votable for Answer {
    fn tally(&self) -> (i64, &VoteDetail) {
        (self.votes, &self.votes_detail)
    }

    fn tally_mut(&mut self) -> (&mut i64, &mut VoteDetail) {
        (&mut self.votes, &mut self.votes_detail)
    }
}
