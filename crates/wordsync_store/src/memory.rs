//! In-memory reference implementations of the storage contracts.

use crate::error::StoreResult;
use crate::progress::{CommitBatch, ProgressStore};
use crate::registry::ContentRegistry;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use wordsync_protocol::{UserId, WordContent, WordId, WordProgress};

/// In-memory progress store.
///
/// Rows are kept per user; `commit` holds the write lock for the whole
/// batch, which is what makes the batch an atomic unit here.
pub struct MemoryProgressStore {
    rows: RwLock<HashMap<UserId, HashMap<WordId, WordProgress>>>,
}

impl MemoryProgressStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }

    /// Total number of rows across all users.
    pub fn len(&self) -> usize {
        self.rows.read().values().map(|m| m.len()).sum()
    }

    /// Returns true if no rows are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns one row, if present. Test and inspection convenience.
    pub fn get(&self, user: &UserId, word: &WordId) -> Option<WordProgress> {
        self.rows
            .read()
            .get(user)
            .and_then(|m| m.get(word))
            .cloned()
    }

    /// Collects `user`'s rows matching the cursor, ordered for paging.
    fn sorted_rows(&self, user: &UserId, since: Option<i64>) -> Vec<WordProgress> {
        let rows = self.rows.read();
        let mut matching: Vec<WordProgress> = rows
            .get(user)
            .map(|m| {
                m.values()
                    .filter(|r| since.map_or(true, |s| r.last_reviewed > s))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        matching.sort_by(|a, b| {
            (a.last_reviewed, &a.word_id).cmp(&(b.last_reviewed, &b.word_id))
        });
        matching
    }
}

impl Default for MemoryProgressStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressStore for MemoryProgressStore {
    fn fetch_existing(&self, user: &UserId, word_ids: &[WordId]) -> StoreResult<Vec<WordProgress>> {
        let rows = self.rows.read();
        let Some(user_rows) = rows.get(user) else {
            return Ok(Vec::new());
        };
        Ok(word_ids
            .iter()
            .filter_map(|id| user_rows.get(id).cloned())
            .collect())
    }

    fn commit(&self, batch: CommitBatch) -> StoreResult<u64> {
        let mut rows = self.rows.write();
        let mut written = 0u64;

        for row in batch.creates {
            let user_rows = rows.entry(row.user_id.clone()).or_default();
            // Insert-if-absent: the loser of a concurrent create is skipped.
            if !user_rows.contains_key(&row.word_id) {
                user_rows.insert(row.word_id.clone(), row);
                written += 1;
            }
        }

        for row in batch.updates {
            let user_rows = rows.entry(row.user_id.clone()).or_default();
            user_rows.insert(row.word_id.clone(), row);
            written += 1;
        }

        Ok(written)
    }

    fn count_since(&self, user: &UserId, since: Option<i64>) -> StoreResult<u64> {
        let rows = self.rows.read();
        let count = rows
            .get(user)
            .map(|m| {
                m.values()
                    .filter(|r| since.map_or(true, |s| r.last_reviewed > s))
                    .count()
            })
            .unwrap_or(0);
        Ok(count as u64)
    }

    fn page_since(
        &self,
        user: &UserId,
        since: Option<i64>,
        offset: u64,
        limit: u32,
    ) -> StoreResult<Vec<WordProgress>> {
        Ok(self
            .sorted_rows(user, since)
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }
}

/// In-memory content registry with seeding helpers.
pub struct MemoryContentRegistry {
    words: RwLock<HashMap<WordId, WordContent>>,
}

impl MemoryContentRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            words: RwLock::new(HashMap::new()),
        }
    }

    /// Adds or replaces the content for a word.
    pub fn insert(&self, word_id: WordId, content: WordContent) {
        self.words.write().insert(word_id, content);
    }

    /// Number of known words.
    pub fn len(&self) -> usize {
        self.words.read().len()
    }

    /// Returns true if the registry has no words.
    pub fn is_empty(&self) -> bool {
        self.words.read().is_empty()
    }
}

impl Default for MemoryContentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentRegistry for MemoryContentRegistry {
    fn known_words(&self, word_ids: &[WordId]) -> StoreResult<HashSet<WordId>> {
        let words = self.words.read();
        Ok(word_ids
            .iter()
            .filter(|id| words.contains_key(id))
            .cloned()
            .collect())
    }

    fn content_for(&self, word_ids: &[WordId]) -> StoreResult<HashMap<WordId, WordContent>> {
        let words = self.words.read();
        Ok(word_ids
            .iter()
            .filter_map(|id| words.get(id).map(|c| (id.clone(), c.clone())))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(user: &str, word: &str, last_reviewed: i64, level: u8) -> WordProgress {
        WordProgress {
            user_id: UserId::new(user),
            word_id: WordId::new(word),
            review_level: level,
            is_ignored: false,
            last_reviewed,
            next_review: last_reviewed + 1000,
            correct_count: 1,
            total_attempts: 1,
        }
    }

    fn content(word: &str) -> WordContent {
        WordContent {
            word: word.into(),
            translation: format!("{word}-t"),
            pronunciation: format!("{word}-p"),
            example: None,
            example_translation: None,
            quiz: vec![],
        }
    }

    #[test]
    fn commit_creates_and_counts() {
        let store = MemoryProgressStore::new();
        let written = store
            .commit(CommitBatch::new(
                vec![row("u1", "w1", 10, 1), row("u1", "w2", 20, 2)],
                vec![],
            ))
            .unwrap();
        assert_eq!(written, 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn create_is_insert_if_absent() {
        let store = MemoryProgressStore::new();
        store
            .commit(CommitBatch::new(vec![row("u1", "w1", 10, 1)], vec![]))
            .unwrap();

        // A second create of the same key is silently skipped.
        let written = store
            .commit(CommitBatch::new(vec![row("u1", "w1", 99, 4)], vec![]))
            .unwrap();
        assert_eq!(written, 0);

        let stored = store
            .get(&UserId::new("u1"), &WordId::new("w1"))
            .unwrap();
        assert_eq!(stored.last_reviewed, 10);
        assert_eq!(stored.review_level, 1);
    }

    #[test]
    fn update_replaces_whole_row() {
        let store = MemoryProgressStore::new();
        store
            .commit(CommitBatch::new(vec![row("u1", "w1", 10, 1)], vec![]))
            .unwrap();
        let written = store
            .commit(CommitBatch::new(vec![], vec![row("u1", "w1", 50, 3)]))
            .unwrap();
        assert_eq!(written, 1);

        let stored = store
            .get(&UserId::new("u1"), &WordId::new("w1"))
            .unwrap();
        assert_eq!(stored.last_reviewed, 50);
        assert_eq!(stored.review_level, 3);
    }

    #[test]
    fn rows_are_scoped_per_user() {
        let store = MemoryProgressStore::new();
        store
            .commit(CommitBatch::new(
                vec![row("u1", "w1", 10, 1), row("u2", "w1", 20, 2)],
                vec![],
            ))
            .unwrap();

        assert_eq!(store.count_since(&UserId::new("u1"), None).unwrap(), 1);
        assert_eq!(store.count_since(&UserId::new("u2"), None).unwrap(), 1);
        assert_eq!(store.count_since(&UserId::new("u3"), None).unwrap(), 0);
    }

    #[test]
    fn cursor_filter_is_strictly_greater() {
        let store = MemoryProgressStore::new();
        store
            .commit(CommitBatch::new(
                vec![
                    row("u1", "w1", 10, 1),
                    row("u1", "w2", 20, 1),
                    row("u1", "w3", 30, 1),
                ],
                vec![],
            ))
            .unwrap();

        let user = UserId::new("u1");
        assert_eq!(store.count_since(&user, None).unwrap(), 3);
        assert_eq!(store.count_since(&user, Some(20)).unwrap(), 1);
        let page = store.page_since(&user, Some(20), 0, 10).unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].word_id.as_str(), "w3");
    }

    #[test]
    fn paging_orders_by_timestamp_then_word_id() {
        let store = MemoryProgressStore::new();
        // Two rows tie on last_reviewed; word_id breaks the tie.
        store
            .commit(CommitBatch::new(
                vec![
                    row("u1", "wb", 20, 1),
                    row("u1", "wa", 20, 1),
                    row("u1", "wc", 10, 1),
                ],
                vec![],
            ))
            .unwrap();

        let user = UserId::new("u1");
        let page = store.page_since(&user, None, 0, 10).unwrap();
        let ids: Vec<&str> = page.iter().map(|r| r.word_id.as_str()).collect();
        assert_eq!(ids, vec!["wc", "wa", "wb"]);
    }

    #[test]
    fn paging_offset_and_limit() {
        let store = MemoryProgressStore::new();
        let creates: Vec<WordProgress> = (0..7)
            .map(|i| row("u1", &format!("w{i}"), 10 + i as i64, 1))
            .collect();
        store.commit(CommitBatch::new(creates, vec![])).unwrap();

        let user = UserId::new("u1");
        let page = store.page_since(&user, None, 5, 3).unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].word_id.as_str(), "w5");
        assert_eq!(page[1].word_id.as_str(), "w6");
    }

    #[test]
    fn fetch_existing_returns_only_present_rows() {
        let store = MemoryProgressStore::new();
        store
            .commit(CommitBatch::new(vec![row("u1", "w1", 10, 1)], vec![]))
            .unwrap();

        let found = store
            .fetch_existing(
                &UserId::new("u1"),
                &[WordId::new("w1"), WordId::new("missing")],
            )
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].word_id.as_str(), "w1");
    }

    #[test]
    fn registry_known_words_and_content() {
        let registry = MemoryContentRegistry::new();
        registry.insert(WordId::new("w1"), content("w1"));
        registry.insert(WordId::new("w2"), content("w2"));

        let known = registry
            .known_words(&[WordId::new("w1"), WordId::new("ghost")])
            .unwrap();
        assert!(known.contains(&WordId::new("w1")));
        assert!(!known.contains(&WordId::new("ghost")));

        let snapshots = registry
            .content_for(&[WordId::new("w2"), WordId::new("ghost")])
            .unwrap();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[&WordId::new("w2")].word, "w2");
    }
}
