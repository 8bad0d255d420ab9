//! Vote direction and per-user membership sets.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Direction of a cast vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Upvote,
    Downvote,
}

impl VoteType {
    pub fn as_str(self) -> &'static str {
        match self {
            VoteType::Upvote => "upvote",
            VoteType::Downvote => "downvote",
        }
    }
}

impl fmt::Display for VoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "upvote" => Ok(VoteType::Upvote),
            "downvote" => Ok(VoteType::Downvote),
            _ => Err(AppError::BadRequest("Invalid vote type".to_string())),
        }
    }
}

/// Which users currently hold an upvote or a downvote on a target.
///
/// A user id is in at most one of the two sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteDetail {
    pub upvotes: BTreeSet<String>,
    pub downvotes: BTreeSet<String>,
}

impl VoteDetail {
    /// The vote `user_id` currently holds, if any.
    pub fn vote_of(&self, user_id: &str) -> Option<VoteType> {
        if self.upvotes.contains(user_id) {
            Some(VoteType::Upvote)
        } else if self.downvotes.contains(user_id) {
            Some(VoteType::Downvote)
        } else {
            None
        }
    }

    /// Replace whatever `user_id` held with `vote`.
    pub fn set_vote(&mut self, user_id: &str, vote: Option<VoteType>) {
        self.upvotes.remove(user_id);
        self.downvotes.remove(user_id);
        match vote {
            Some(VoteType::Upvote) => {
                self.upvotes.insert(user_id.to_string());
            }
            Some(VoteType::Downvote) => {
                self.downvotes.insert(user_id.to_string());
            }
            None => {}
        }
    }

    /// `|upvotes| - |downvotes|`.
    pub fn net(&self) -> i64 {
        self.upvotes.len() as i64 - self.downvotes.len() as i64
    }
}
