//! The content-registry contract.

use crate::error::StoreResult;
use std::collections::{HashMap, HashSet};
use wordsync_protocol::{WordContent, WordId};

/// Read-only contract over the set of valid words and their static content.
///
/// The registry is owned by the content-management side of the system; the
/// sync engine only checks existence (push validation) and fetches
/// snapshots (pull denormalization). Both are batched: one call per
/// request, never one per item.
pub trait ContentRegistry: Send + Sync {
    /// Returns the subset of `word_ids` that exist in the registry.
    fn known_words(&self, word_ids: &[WordId]) -> StoreResult<HashSet<WordId>>;

    /// Returns content snapshots for the given ids, keyed by id. Ids with
    /// no content are absent from the map.
    fn content_for(&self, word_ids: &[WordId]) -> StoreResult<HashMap<WordId, WordContent>>;
}
