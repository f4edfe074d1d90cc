//! Test fixtures and seeded-component helpers.

use std::sync::Arc;
use wordsync_engine::SyncEngine;
use wordsync_protocol::{ProgressItem, QuizItem, WordContent, WordId};
use wordsync_server::{ServerConfig, SyncServer};
use wordsync_store::{MemoryContentRegistry, MemoryProgressStore};

/// Content for one test word, with a single quiz question attached.
pub fn test_content(word: &str) -> WordContent {
    WordContent {
        word: word.into(),
        translation: format!("{word} (translated)"),
        pronunciation: format!("{word}-pron"),
        example: Some(format!("An example sentence with {word}.")),
        example_translation: None,
        quiz: vec![QuizItem {
            question: format!("Which one means {word}?"),
            question_translation: None,
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_answer: "a".into(),
            explanation: None,
        }],
    }
}

/// A progress item for `word` with counters derived from the level.
pub fn test_item(word: &WordId, last_reviewed: i64, review_level: u8) -> ProgressItem {
    ProgressItem {
        word_id: word.clone(),
        review_level,
        is_ignored: false,
        last_reviewed,
        next_review: last_reviewed + 86_400_000,
        correct_count: u32::from(review_level),
        total_attempts: u32::from(review_level) + 2,
    }
}

/// A registry seeded with `count` words named `word-0000`, `word-0001`, ...
pub fn seeded_registry(count: usize) -> (Arc<MemoryContentRegistry>, Vec<WordId>) {
    let registry = Arc::new(MemoryContentRegistry::new());
    let words: Vec<WordId> = (0..count)
        .map(|i| {
            let id = WordId::new(format!("word-{i:04}"));
            registry.insert(id.clone(), test_content(id.as_str()));
            id
        })
        .collect();
    (registry, words)
}

/// An engine over a fresh store and a registry of `count` words.
pub fn seeded_engine(
    count: usize,
) -> (
    SyncEngine<MemoryProgressStore, MemoryContentRegistry>,
    Vec<WordId>,
) {
    let (registry, words) = seeded_registry(count);
    let engine = SyncEngine::new(Arc::new(MemoryProgressStore::new()), registry);
    (engine, words)
}

/// A server over fresh in-memory stores with `count` words seeded.
pub fn seeded_server(config: ServerConfig, count: usize) -> (SyncServer, Vec<WordId>) {
    let server = SyncServer::in_memory(config);
    let words: Vec<WordId> = (0..count)
        .map(|i| {
            let id = WordId::new(format!("word-{i:04}"));
            server.registry().insert(id.clone(), test_content(id.as_str()));
            id
        })
        .collect();
    (server, words)
}
