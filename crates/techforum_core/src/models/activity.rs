//! Per-user contribution summary.

use super::question::QuestionSummary;
use super::Answer;
use serde::Serialize;

/// How much a user has contributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub questions_asked: u64,
    pub answers_given: u64,
}

/// A user's newest questions and answers.
#[derive(Debug, Clone, Serialize)]
pub struct RecentActivity {
    pub questions: Vec<QuestionSummary>,
    pub answers: Vec<Answer>,
}

/// Public profile built from forum content alone.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserActivity {
    pub user_id: String,
    pub stats: UserStats,
    pub recent_activity: RecentActivity,
}
