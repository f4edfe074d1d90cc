//! Per-word learning progress records.

use crate::error::{ProtocolError, ProtocolResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest spaced-repetition mastery tier.
pub const REVIEW_LEVEL_MAX: u8 = 4;

/// Opaque identifier of a user. The engine never parses it; it only scopes
/// reads and writes with it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    /// Creates a user id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Opaque identifier of a learnable word in the content registry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordId(pub String);

impl WordId {
    /// Creates a word id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A client-reported progress record for one word.
///
/// This is the push-direction wire form: the owning user is implied by the
/// authenticated request, not carried per item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressItem {
    /// Word the report refers to.
    pub word_id: WordId,
    /// Spaced-repetition mastery tier, 0..=4.
    pub review_level: u8,
    /// Whether the user opted out of reviewing this word.
    #[serde(default)]
    pub is_ignored: bool,
    /// Most recent review event, milliseconds since the Unix epoch.
    pub last_reviewed: i64,
    /// Next scheduled review, milliseconds since the Unix epoch.
    /// Client-computed; the server stores it opaquely.
    pub next_review: i64,
    /// Correct answers over the life of the row.
    #[serde(default)]
    pub correct_count: u32,
    /// Total review attempts over the life of the row.
    #[serde(default)]
    pub total_attempts: u32,
}

impl ProgressItem {
    /// Checks shape and ranges. Counters are unsigned by construction, so
    /// only the level and timestamps need runtime checks.
    pub fn validate(&self) -> ProtocolResult<()> {
        if self.review_level > REVIEW_LEVEL_MAX {
            return Err(ProtocolError::ReviewLevelOutOfRange(self.review_level));
        }
        if self.last_reviewed <= 0 {
            return Err(ProtocolError::NonPositiveTimestamp {
                field: "lastReviewed",
                value: self.last_reviewed,
            });
        }
        if self.next_review <= 0 {
            return Err(ProtocolError::NonPositiveTimestamp {
                field: "nextReview",
                value: self.next_review,
            });
        }
        Ok(())
    }

    /// Converts the report into a stored row owned by `user_id`.
    pub fn into_progress(self, user_id: UserId) -> WordProgress {
        WordProgress {
            user_id,
            word_id: self.word_id,
            review_level: self.review_level,
            is_ignored: self.is_ignored,
            last_reviewed: self.last_reviewed,
            next_review: self.next_review,
            correct_count: self.correct_count,
            total_attempts: self.total_attempts,
        }
    }
}

/// One stored progress row. At most one exists per `(user_id, word_id)`,
/// and the sync engine never deletes one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordProgress {
    /// Owning user.
    pub user_id: UserId,
    /// Word the row tracks.
    pub word_id: WordId,
    /// Spaced-repetition mastery tier, 0..=4. Non-decreasing across merges.
    pub review_level: u8,
    /// Whether the user opted out of reviewing this word.
    pub is_ignored: bool,
    /// Most recent review event known to the server, ms since epoch.
    pub last_reviewed: i64,
    /// Next scheduled review, ms since epoch (client-computed).
    pub next_review: i64,
    /// Correct answers as last reported by the winning item.
    pub correct_count: u32,
    /// Total attempts as last reported by the winning item.
    pub total_attempts: u32,
}
