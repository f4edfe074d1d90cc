//! Error types for protocol validation.

use thiserror::Error;

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Input-shape errors detected before a request reaches the engine.
///
/// These reject the whole request; nothing is partially applied. Referential
/// problems (unknown word ids) are deliberately NOT represented here — they
/// are filtered silently by the engine's validator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Review level outside the 0..=4 mastery range.
    #[error("review level {0} is out of range (0..=4)")]
    ReviewLevelOutOfRange(u8),

    /// A millisecond-epoch timestamp field that must be positive.
    #[error("{field} must be a positive millisecond timestamp, got {value}")]
    NonPositiveTimestamp {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: i64,
    },

    /// A push batch with no items.
    #[error("push batch must contain at least one item")]
    EmptyBatch,

    /// Page number below 1.
    #[error("page must be at least 1")]
    PageOutOfRange,

    /// Page size outside 1..=100.
    #[error("limit {0} is out of range (1..=100)")]
    LimitOutOfRange(u32),
}
