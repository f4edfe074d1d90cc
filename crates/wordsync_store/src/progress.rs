//! The progress-row storage contract.

use crate::error::StoreResult;
use wordsync_protocol::{UserId, WordId, WordProgress};

/// The decided writes of one push, applied as a single atomic unit.
#[derive(Debug, Clone, Default)]
pub struct CommitBatch {
    /// Rows with no existing `(user, word)` counterpart. Applied with
    /// insert-if-absent semantics: a row that appeared concurrently is
    /// skipped, not an error.
    pub creates: Vec<WordProgress>,
    /// Whole-row replacements of existing rows.
    pub updates: Vec<WordProgress>,
}

impl CommitBatch {
    /// Creates a batch from decided creates and updates.
    pub fn new(creates: Vec<WordProgress>, updates: Vec<WordProgress>) -> Self {
        Self { creates, updates }
    }

    /// Number of rows the batch intends to write.
    pub fn len(&self) -> usize {
        self.creates.len() + self.updates.len()
    }

    /// Returns true if the batch writes nothing.
    pub fn is_empty(&self) -> bool {
        self.creates.is_empty() && self.updates.is_empty()
    }
}

/// Read/write contract for the per-`(user, word)` progress table.
///
/// Implementations must make `commit` atomic on the batch boundary: either
/// every surviving row of the batch becomes visible together, or none does
/// and an error is returned. No other method mutates state.
pub trait ProgressStore: Send + Sync {
    /// Fetches the existing rows for `user` among `word_ids`, in one
    /// batched read. Missing rows are simply absent from the result.
    fn fetch_existing(&self, user: &UserId, word_ids: &[WordId]) -> StoreResult<Vec<WordProgress>>;

    /// Applies a batch atomically and returns the number of rows actually
    /// written (creates that lost an insert-if-absent race are not counted).
    fn commit(&self, batch: CommitBatch) -> StoreResult<u64>;

    /// Counts `user`'s rows with `last_reviewed` strictly greater than
    /// `since` (all rows when `since` is `None`).
    fn count_since(&self, user: &UserId, since: Option<i64>) -> StoreResult<u64>;

    /// Returns one page of `user`'s rows matching the same cursor filter,
    /// ordered by `(last_reviewed, word_id)` ascending.
    fn page_since(
        &self,
        user: &UserId,
        since: Option<i64>,
        offset: u64,
        limit: u32,
    ) -> StoreResult<Vec<WordProgress>>;
}
