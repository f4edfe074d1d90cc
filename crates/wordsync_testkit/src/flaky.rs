//! Fault injection for storage-failure tests.

use std::sync::atomic::{AtomicBool, Ordering};
use wordsync_protocol::{UserId, WordId, WordProgress};
use wordsync_store::{CommitBatch, MemoryProgressStore, ProgressStore, StoreError, StoreResult};

/// A progress store whose commits can be made to fail on command.
///
/// Reads always succeed; only `commit` observes the failure flag. This is
/// how tests assert the all-or-nothing push contract: flip the flag, push,
/// verify the error, then verify nothing became visible.
pub struct FlakyProgressStore {
    inner: MemoryProgressStore,
    fail_commits: AtomicBool,
}

impl FlakyProgressStore {
    /// Creates a healthy store.
    pub fn new() -> Self {
        Self {
            inner: MemoryProgressStore::new(),
            fail_commits: AtomicBool::new(false),
        }
    }

    /// Makes subsequent commits fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.fail_commits.store(failing, Ordering::SeqCst);
    }

    /// The wrapped in-memory store, for direct inspection.
    pub fn inner(&self) -> &MemoryProgressStore {
        &self.inner
    }
}

impl Default for FlakyProgressStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressStore for FlakyProgressStore {
    fn fetch_existing(&self, user: &UserId, word_ids: &[WordId]) -> StoreResult<Vec<WordProgress>> {
        self.inner.fetch_existing(user, word_ids)
    }

    fn commit(&self, batch: CommitBatch) -> StoreResult<u64> {
        if self.fail_commits.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("injected commit failure".into()));
        }
        self.inner.commit(batch)
    }

    fn count_since(&self, user: &UserId, since: Option<i64>) -> StoreResult<u64> {
        self.inner.count_since(user, since)
    }

    fn page_since(
        &self,
        user: &UserId,
        since: Option<i64>,
        offset: u64,
        limit: u32,
    ) -> StoreResult<Vec<WordProgress>> {
        self.inner.page_since(user, since, offset, limit)
    }
}
