//! Atomic vote writes shared by questions and answers.

use super::rows::{load, store};
use super::tables::RowTable;
use crate::error::AppError;
use crate::models::VoteType;
use crate::voting::{apply_vote, Votable, VoteOutcome};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Read the target, apply the toggle and write it back inside one write
/// transaction. redb serializes writers, so the membership check, the set
/// change and the counter change land together or not at all.
pub(super) fn vote_in_txn<T>(
    db: &redb::Database,
    table: RowTable,
    entity: &'static str,
    id: &str,
    actor_id: &str,
    vote_type: VoteType,
) -> Result<VoteOutcome, AppError>
where
    T: Votable + Serialize + DeserializeOwned,
{
    let write_txn = db.begin_write()?;
    let outcome = {
        let mut rows = write_txn.open_table(table)?;
        let mut target: T = load(&rows, id)?.ok_or(AppError::NotFound(entity))?;
        let outcome = apply_vote(&mut target, actor_id, vote_type)?;
        store(&mut rows, id, &target)?;
        outcome
    };
    write_txn.commit()?;
    tracing::debug!(
        "{} {} now at {} votes ({:?} by {})",
        entity,
        id,
        outcome.votes,
        outcome.user_vote,
        actor_id
    );
    Ok(outcome)
}
