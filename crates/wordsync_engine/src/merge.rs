//! Create/update/discard classification.
//!
//! This is pure logic over already-fetched data: it performs no I/O and
//! cannot fail, which keeps it unit-testable without any store.

use std::collections::HashMap;
use wordsync_protocol::{ProgressItem, WordId, WordProgress};

/// The decided fate of a validated batch.
#[derive(Debug, Clone, Default)]
pub struct MergePlan {
    /// Items with no existing row: to be inserted (if still absent).
    pub creates: Vec<ProgressItem>,
    /// Items that passed the monotonic guard against an existing row.
    pub updates: Vec<ProgressItem>,
    /// Items dropped as stale, regressive, or shadowed by a batch-mate.
    pub discarded: usize,
}

impl MergePlan {
    /// Number of rows the plan intends to write.
    pub fn write_count(&self) -> usize {
        self.creates.len() + self.updates.len()
    }

    /// Returns true if the plan writes nothing.
    pub fn is_empty(&self) -> bool {
        self.creates.is_empty() && self.updates.is_empty()
    }
}

/// The monotonic merge guard.
///
/// `last_reviewed` alone is untrustworthy: client clocks can be stale and
/// network retries reorder delivery. Requiring the level to be >= as well
/// stops a late retry of an earlier, lower-mastery review from clobbering
/// the more advanced state a faster-arriving review already established.
fn supersedes(incoming: &ProgressItem, current_last: i64, current_level: u8) -> bool {
    incoming.last_reviewed > current_last && incoming.review_level >= current_level
}

/// Classifies each item of a validated batch as create, update, or discard.
///
/// - Create: no existing row for the word
/// - Update: existing row, and the item passes the guard (strictly newer
///   `last_reviewed` AND `review_level` not lower)
/// - Discard: everything else, silently
///
/// Duplicate word ids within the batch are folded through the same guard
/// first, so a batch can never regress a row it also advances, whatever
/// order the duplicates arrived in.
pub fn classify(
    items: Vec<ProgressItem>,
    existing: &HashMap<WordId, WordProgress>,
) -> MergePlan {
    let mut plan = MergePlan::default();

    // Intra-batch fold: keep one winner per word id.
    let mut winners: Vec<ProgressItem> = Vec::with_capacity(items.len());
    let mut slot_by_word: HashMap<WordId, usize> = HashMap::new();
    for item in items {
        match slot_by_word.get(&item.word_id) {
            Some(&slot) => {
                let held = &winners[slot];
                if supersedes(&item, held.last_reviewed, held.review_level) {
                    winners[slot] = item;
                }
                plan.discarded += 1;
            }
            None => {
                slot_by_word.insert(item.word_id.clone(), winners.len());
                winners.push(item);
            }
        }
    }

    for item in winners {
        match existing.get(&item.word_id) {
            None => plan.creates.push(item),
            Some(row) if supersedes(&item, row.last_reviewed, row.review_level) => {
                plan.updates.push(item);
            }
            Some(_) => plan.discarded += 1,
        }
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use wordsync_protocol::UserId;

    fn item(word: &str, last_reviewed: i64, level: u8) -> ProgressItem {
        ProgressItem {
            word_id: WordId::new(word),
            review_level: level,
            is_ignored: false,
            last_reviewed,
            next_review: last_reviewed + 1000,
            correct_count: 0,
            total_attempts: 0,
        }
    }

    fn existing_map(rows: Vec<(&str, i64, u8)>) -> HashMap<WordId, WordProgress> {
        rows.into_iter()
            .map(|(word, last_reviewed, level)| {
                let row = item(word, last_reviewed, level).into_progress(UserId::new("u1"));
                (row.word_id.clone(), row)
            })
            .collect()
    }

    #[test]
    fn unknown_rows_become_creates() {
        let plan = classify(vec![item("w1", 100, 2)], &HashMap::new());
        assert_eq!(plan.creates.len(), 1);
        assert!(plan.updates.is_empty());
        assert_eq!(plan.discarded, 0);
    }

    #[test]
    fn newer_and_not_lower_level_updates() {
        let existing = existing_map(vec![("w1", 100, 2)]);
        let plan = classify(vec![item("w1", 150, 2)], &existing);
        assert_eq!(plan.updates.len(), 1);
        assert_eq!(plan.discarded, 0);
    }

    #[test]
    fn equal_timestamp_is_discarded() {
        // The idempotent re-push path: same timestamp, same level.
        let existing = existing_map(vec![("w1", 100, 2)]);
        let plan = classify(vec![item("w1", 100, 2)], &existing);
        assert!(plan.is_empty());
        assert_eq!(plan.discarded, 1);
    }

    #[test]
    fn older_report_is_discarded() {
        let existing = existing_map(vec![("w1", 100, 2)]);
        let plan = classify(vec![item("w1", 50, 1)], &existing);
        assert!(plan.is_empty());
        assert_eq!(plan.discarded, 1);
    }

    #[test]
    fn level_regression_is_discarded_even_when_newer() {
        // A stale device with a fresh clock must not demote mastery.
        let existing = existing_map(vec![("w1", 100, 3)]);
        let plan = classify(vec![item("w1", 500, 2)], &existing);
        assert!(plan.is_empty());
        assert_eq!(plan.discarded, 1);
    }

    #[test]
    fn mixed_batch_splits_correctly() {
        let existing = existing_map(vec![("w2", 100, 2), ("w3", 100, 2)]);
        let plan = classify(
            vec![
                item("w1", 100, 1), // create
                item("w2", 200, 3), // update
                item("w3", 50, 2),  // stale: discard
            ],
            &existing,
        );
        assert_eq!(plan.creates.len(), 1);
        assert_eq!(plan.updates.len(), 1);
        assert_eq!(plan.discarded, 1);
        assert_eq!(plan.write_count(), 2);
    }

    #[test]
    fn intra_batch_duplicates_keep_the_winner() {
        // The fresher, higher-mastery report wins regardless of arrival order.
        let plan = classify(
            vec![item("w1", 200, 3), item("w1", 100, 1)],
            &HashMap::new(),
        );
        assert_eq!(plan.creates.len(), 1);
        assert_eq!(plan.creates[0].last_reviewed, 200);
        assert_eq!(plan.discarded, 1);

        let plan = classify(
            vec![item("w1", 100, 1), item("w1", 200, 3)],
            &HashMap::new(),
        );
        assert_eq!(plan.creates.len(), 1);
        assert_eq!(plan.creates[0].last_reviewed, 200);
    }

    #[test]
    fn intra_batch_duplicate_cannot_regress_level() {
        let plan = classify(
            vec![item("w1", 100, 3), item("w1", 200, 1)],
            &HashMap::new(),
        );
        // The newer-but-lower report fails the guard against its batch-mate.
        assert_eq!(plan.creates.len(), 1);
        assert_eq!(plan.creates[0].review_level, 3);
    }

    proptest! {
        /// Whatever the batch contains, an update never lowers the stored
        /// level and never rewinds the stored timestamp.
        #[test]
        fn updates_always_advance(
            batch in proptest::collection::vec(
                (0usize..4, 1i64..1_000, 0u8..=4),
                1..20,
            ),
            current_last in 1i64..1_000,
            current_level in 0u8..=4,
        ) {
            let existing = existing_map(vec![("w0", current_last, current_level)]);
            let items: Vec<ProgressItem> = batch
                .into_iter()
                .map(|(word, last_reviewed, level)| {
                    item(&format!("w{word}"), last_reviewed, level)
                })
                .collect();

            let plan = classify(items, &existing);
            for update in &plan.updates {
                prop_assert_eq!(update.word_id.as_str(), "w0");
                prop_assert!(update.last_reviewed > current_last);
                prop_assert!(update.review_level >= current_level);
            }
        }

        /// Classification is exhaustive: every item is written or discarded.
        #[test]
        fn every_item_is_accounted_for(
            batch in proptest::collection::vec(
                (0usize..6, 1i64..1_000, 0u8..=4),
                0..30,
            ),
        ) {
            let total = batch.len();
            let items: Vec<ProgressItem> = batch
                .into_iter()
                .map(|(word, last_reviewed, level)| {
                    item(&format!("w{word}"), last_reviewed, level)
                })
                .collect();

            let plan = classify(items, &HashMap::new());
            prop_assert_eq!(plan.write_count() + plan.discarded, total);
        }
    }
}
