//! Data models for persistence and the HTTP API.

/// Request identity and capability checks.
pub mod actor;
/// Per-user stats and recent activity.
pub mod activity;
/// Answer rows and payloads.
pub mod answer;
/// Category rows and payloads.
pub mod category;
/// Question rows and payloads.
pub mod question;
/// Vote membership shared by questions and answers.
pub mod vote;


pub use actor::{can_manage, Actor, Owned, Role};
pub use answer::Answer;
pub use category::Category;
pub use question::Question;
pub use vote::{VoteDetail, VoteType};

use uuid::Uuid;

/// Build a prefixed random identifier such as `q_4f1c...`.
pub(crate) fn new_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}
