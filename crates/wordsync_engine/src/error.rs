//! Error types for the sync engine.

use thiserror::Error;
use wordsync_protocol::ProtocolError;
use wordsync_store::StoreError;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while syncing.
///
/// Note what is NOT here: unknown word ids and stale or regressive items
/// are never errors — they are silently dropped and only reduce the
/// reported `syncedCount`.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The request failed input-shape validation; nothing was applied.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] ProtocolError),

    /// A storage collaborator failed. For pushes this means the whole
    /// batch was rolled back and the client should retry it.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
