//! Property-based test generators using proptest.
//!
//! Strategies produce protocol values that already satisfy input-shape
//! validation, so properties exercise the engine's merge semantics rather
//! than tripping over shape rejections.

use proptest::prelude::*;
use wordsync_protocol::{ProgressItem, WordId, REVIEW_LEVEL_MAX};

/// Strategy for a word id drawn from a small pool, `word-0000` upward.
///
/// A small pool makes id collisions (the interesting merge cases) likely.
pub fn word_id_strategy(pool: usize) -> impl Strategy<Value = WordId> {
    (0..pool).prop_map(|i| WordId::new(format!("word-{i:04}")))
}

/// Strategy for a shape-valid progress item over a word pool.
pub fn progress_item_strategy(pool: usize) -> impl Strategy<Value = ProgressItem> {
    (
        word_id_strategy(pool),
        0u8..=REVIEW_LEVEL_MAX,
        any::<bool>(),
        1i64..1_000_000,
        1i64..1_000_000,
        0u32..1_000,
        0u32..2_000,
    )
        .prop_map(
            |(word_id, review_level, is_ignored, last_reviewed, next_review, correct, total)| {
                ProgressItem {
                    word_id,
                    review_level,
                    is_ignored,
                    last_reviewed,
                    next_review,
                    correct_count: correct,
                    total_attempts: total,
                }
            },
        )
}

/// Strategy for a non-empty batch of shape-valid items.
pub fn batch_strategy(pool: usize, max_len: usize) -> impl Strategy<Value = Vec<ProgressItem>> {
    prop::collection::vec(progress_item_strategy(pool), 1..max_len)
}
