//! Denormalized content snapshots.
//!
//! Pull responses carry a snapshot of each word's static learning content so
//! the client can render and re-quiz offline without a second round-trip.

use serde::{Deserialize, Serialize};

/// One multiple-choice quiz question attached to a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizItem {
    /// The question, in the learned language.
    pub question: String,
    /// Question translated into the user's language, if available.
    #[serde(default)]
    pub question_translation: Option<String>,
    /// Answer options, in presentation order.
    pub options: Vec<String>,
    /// The correct option.
    pub correct_answer: String,
    /// Explanation shown after answering, if available.
    #[serde(default)]
    pub explanation: Option<String>,
}

/// Static learning content for one word, as served by the content registry.
///
/// The word id itself is not repeated here; it comes from the progress row
/// this snapshot is joined to (or from the registry map key).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordContent {
    /// The word text in the learned language.
    pub word: String,
    /// Translation into the user's language.
    pub translation: String,
    /// Pronunciation guide.
    pub pronunciation: String,
    /// Example sentence, if available.
    #[serde(default)]
    pub example: Option<String>,
    /// Translation of the example sentence, if available.
    #[serde(default)]
    pub example_translation: Option<String>,
    /// Quiz questions for this word, in full and in order.
    pub quiz: Vec<QuizItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_roundtrip() {
        let content = WordContent {
            word: "사과".into(),
            translation: "apple".into(),
            pronunciation: "sagwa".into(),
            example: Some("사과를 먹어요".into()),
            example_translation: None,
            quiz: vec![QuizItem {
                question: "사과?".into(),
                question_translation: None,
                options: vec!["apple".into(), "pear".into()],
                correct_answer: "apple".into(),
                explanation: Some("fruit".into()),
            }],
        };

        let json = serde_json::to_string(&content).unwrap();
        let decoded: WordContent = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, content);
    }

    #[test]
    fn optional_fields_default_to_none() {
        let decoded: WordContent = serde_json::from_str(
            r#"{"word":"w","translation":"t","pronunciation":"p","quiz":[]}"#,
        )
        .unwrap();
        assert!(decoded.example.is_none());
        assert!(decoded.example_translation.is_none());
        assert!(decoded.quiz.is_empty());
    }

    #[test]
    fn quiz_order_is_preserved() {
        let make = |q: &str| QuizItem {
            question: q.into(),
            question_translation: None,
            options: vec!["a".into(), "b".into()],
            correct_answer: "a".into(),
            explanation: None,
        };
        let content = WordContent {
            word: "w".into(),
            translation: "t".into(),
            pronunciation: "p".into(),
            example: None,
            example_translation: None,
            quiz: vec![make("q1"), make("q2"), make("q3")],
        };

        let json = serde_json::to_string(&content).unwrap();
        let decoded: WordContent = serde_json::from_str(&json).unwrap();
        let questions: Vec<&str> = decoded.quiz.iter().map(|q| q.question.as_str()).collect();
        assert_eq!(questions, vec!["q1", "q2", "q3"]);
    }
}
