//! Three-state vote toggle shared by questions and answers.
//!
//! Each (user, target) pair is in one of `none`, `upvoted` or `downvoted`.
//! Casting the vote a user already holds retracts it; casting the opposite
//! vote flips it. The net counter moves by the matching delta so that
//! `votes == |upvotes| - |downvotes|` holds after every call.

use crate::error::AppError;
use crate::models::{Owned, VoteDetail, VoteType};
use serde::Serialize;

/// Where a single user stands on a single target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteState {
    None,
    Upvoted,
    Downvoted,
}

impl VoteState {
    /// Read the current state of `user_id` from the membership sets.
    pub fn of(detail: &VoteDetail, user_id: &str) -> Self {
        Self::from(detail.vote_of(user_id))
    }

    /// Next state and counter delta when `requested` is cast from `self`.
    pub fn transition(self, requested: VoteType) -> (VoteState, i64) {
        match (self, requested) {
            (VoteState::None, VoteType::Upvote) => (VoteState::Upvoted, 1),
            (VoteState::None, VoteType::Downvote) => (VoteState::Downvoted, -1),
            (VoteState::Upvoted, VoteType::Upvote) => (VoteState::None, -1),
            (VoteState::Downvoted, VoteType::Downvote) => (VoteState::None, 1),
            (VoteState::Upvoted, VoteType::Downvote) => (VoteState::Downvoted, -2),
            (VoteState::Downvoted, VoteType::Upvote) => (VoteState::Upvoted, 2),
        }
    }

    pub fn as_vote(self) -> Option<VoteType> {
        match self {
            VoteState::None => None,
            VoteState::Upvoted => Some(VoteType::Upvote),
            VoteState::Downvoted => Some(VoteType::Downvote),
        }
    }
}

impl From<Option<VoteType>> for VoteState {
    fn from(value: Option<VoteType>) -> Self {
        match value {
            None => VoteState::None,
            Some(VoteType::Upvote) => VoteState::Upvoted,
            Some(VoteType::Downvote) => VoteState::Downvoted,
        }
    }
}

/// A row carrying a net vote counter and its membership sets.
pub trait Votable: Owned {
    fn tally(&self) -> (i64, &VoteDetail);
    fn tally_mut(&mut self) -> (&mut i64, &mut VoteDetail);
}

/// Result of a vote as returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteOutcome {
    pub votes: i64,
    /// `null` when the caller no longer holds a vote.
    pub user_vote: Option<VoteType>,
}

/// Apply `vote_type` from `actor_id` to `target` in memory.
///
/// The caller persists the mutated row in the same storage transaction it
/// was read in.
///
/// # Errors
/// [`AppError::Forbidden`] when `actor_id` owns the target.
pub fn apply_vote<T: Votable>(
    target: &mut T,
    actor_id: &str,
    vote_type: VoteType,
) -> Result<VoteOutcome, AppError> {
    if target.owner_id() == actor_id {
        return Err(AppError::Forbidden(
            "Cannot vote on your own content".to_string(),
        ));
    }

    let (votes, detail) = target.tally_mut();
    let (next, delta) = VoteState::of(detail, actor_id).transition(vote_type);
    detail.set_vote(actor_id, next.as_vote());
    *votes += delta;

    Ok(VoteOutcome {
        votes: *votes,
        user_vote: next.as_vote(),
    })
}
