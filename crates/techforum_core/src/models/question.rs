//! Question rows, API payloads and response shapes.

use super::category::CategoryBrief;
use super::{new_id, Answer, Owned, VoteDetail};
use crate::text::normalize_tag;
use crate::voting::Votable;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Question stored in the database and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub title: String,
    pub content: String,
    pub user_id: String,
    pub category_id: String,
    pub tags: Vec<String>,
    pub views: u64,
    pub votes: i64,
    /// Answer ids in creation order.
    #[serde(rename = "answerIds")]
    pub answers: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_resolved: bool,
    pub is_pinned: bool,
    pub is_locked: bool,
    pub votes_detail: VoteDetail,
}

/// Request payload for asking a question.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionRequest {
    pub title: String,
    pub content: String,
    pub category_id: String,
    pub tags: Vec<String>,
}

/// Request payload for editing a question. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuestionRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category_id: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_pinned: Option<bool>,
    pub is_locked: Option<bool>,
}

/// Listing row: the question, its answer count and its category.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSummary {
    #[serde(flatten)]
    pub question: Question,
    pub answer_count: usize,
    /// `null` when the category row is gone.
    pub category: Option<CategoryBrief>,
}

/// Detail view: the question with its answers in display order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDetail {
    #[serde(flatten)]
    pub question: Question,
    pub answers: Vec<Answer>,
    pub answer_count: usize,
}

/// Compact row embedded in category details.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionBrief {
    pub id: String,
    pub title: String,
    pub user_id: String,
    pub votes: i64,
    pub created_at: DateTime<Utc>,
}

impl Question {
    /// Create a new question with empty vote state and lowercased tags.
    pub fn new(
        title: String,
        content: String,
        user_id: String,
        category_id: String,
        tags: Vec<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: new_id("q"),
            title,
            content,
            user_id,
            category_id,
            tags: normalize_tags(&tags),
            views: 0,
            votes: 0,
            answers: Vec::new(),
            created_at: now,
            updated_at: now,
            is_resolved: false,
            is_pinned: false,
            is_locked: false,
            votes_detail: VoteDetail::default(),
        }
    }

    pub fn answer_count(&self) -> usize {
        self.answers.len()
    }
}

/// Lowercase tags for storage, dropping blanks and duplicates while keeping order.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = normalize_tag(tag);
        if !tag.is_empty() && !normalized.contains(&tag) {
            normalized.push(tag);
        }
    }
    normalized
}

/// Apply the content fields of an update request. Category moves and
/// moderation flags are handled by the transaction layer.
pub(crate) fn apply_content_update(question: &mut Question, update: &UpdateQuestionRequest) {
    if let Some(title) = &update.title {
        question.title = title.trim().to_string();
    }
    if let Some(content) = &update.content {
        question.content = content.clone();
    }
    if let Some(tags) = &update.tags {
        question.tags = normalize_tags(tags);
    }
    question.updated_at = Utc::now();
}

impl Owned for Question {
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}

impl Votable for Question {
    fn tally(&self) -> (i64, &VoteDetail) {
        (self.votes, &self.votes_detail)
    }

    fn tally_mut(&mut self) -> (&mut i64, &mut VoteDetail) {
        (&mut self.votes, &mut self.votes_detail)
    }
}

impl QuestionSummary {
    pub fn new(question: Question, category: Option<CategoryBrief>) -> Self {
        Self {
            answer_count: question.answer_count(),
            question,
            category,
        }
    }
}

impl From<&Question> for QuestionBrief {
    fn from(value: &Question) -> Self {
        Self {
            id: value.id.clone(),
            title: value.title.clone(),
            user_id: value.user_id.clone(),
            votes: value.votes,
            created_at: value.created_at,
        }
    }
}
