//! Atomic application of a merge plan.

use crate::error::EngineResult;
use crate::merge::MergePlan;
use tracing::debug;
use wordsync_protocol::UserId;
use wordsync_store::{CommitBatch, ProgressStore};

/// Applies a merge plan against the store as one atomic unit.
///
/// Returns the number of rows actually written, which is what the push
/// reports as `syncedCount`: creates that lost an insert-if-absent race to
/// a concurrent push shrink the count further. A store error means nothing
/// was committed; the caller retries the whole batch.
pub fn commit_plan<S: ProgressStore + ?Sized>(
    store: &S,
    user: &UserId,
    plan: MergePlan,
) -> EngineResult<u64> {
    if plan.is_empty() {
        return Ok(0);
    }

    let creates = plan
        .creates
        .into_iter()
        .map(|item| item.into_progress(user.clone()))
        .collect();
    let updates = plan
        .updates
        .into_iter()
        .map(|item| item.into_progress(user.clone()))
        .collect();

    let batch = CommitBatch::new(creates, updates);
    let intended = batch.len();
    let written = store.commit(batch)?;
    debug!(user = %user, intended, written, "committed progress batch");
    Ok(written)
}
