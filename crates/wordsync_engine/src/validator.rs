//! Known-word filtering of inbound batches.

use crate::error::EngineResult;
use std::collections::HashSet;
use tracing::debug;
use wordsync_protocol::{ProgressItem, WordId};
use wordsync_store::ContentRegistry;

/// Filters a batch down to items whose word exists in the registry.
///
/// Invalid items are dropped, not rejected: a stale client-side content
/// cache pointing at a retired word must not block syncing the rest of the
/// batch. The existence check is one batched query over the distinct id
/// set, never one query per item.
pub fn filter_known<R: ContentRegistry + ?Sized>(
    registry: &R,
    items: Vec<ProgressItem>,
) -> EngineResult<Vec<ProgressItem>> {
    if items.is_empty() {
        return Ok(items);
    }

    let distinct: Vec<WordId> = items
        .iter()
        .map(|item| item.word_id.clone())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let known = registry.known_words(&distinct)?;

    let submitted = items.len();
    let retained: Vec<ProgressItem> = items
        .into_iter()
        .filter(|item| known.contains(&item.word_id))
        .collect();

    let dropped = submitted - retained.len();
    if dropped > 0 {
        debug!(submitted, dropped, "dropped items referencing unknown words");
    }

    Ok(retained)
}
