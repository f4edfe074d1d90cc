//! Error types for the sync server.

use thiserror::Error;
use wordsync_engine::EngineError;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that can occur in the sync server.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Invalid request at the server boundary.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Authentication or authorization failed.
    #[error("not authorized: {0}")]
    NotAuthorized(String),

    /// Push batch exceeded the configured maximum.
    #[error("push batch too large: {submitted} items exceeds the maximum of {max}")]
    BatchTooLarge {
        /// Items submitted.
        submitted: usize,
        /// Configured maximum.
        max: u32,
    },

    /// The engine rejected or failed the request.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    /// Returns true if this is a client error (4xx).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ServerError::InvalidRequest(_)
                | ServerError::NotAuthorized(_)
                | ServerError::BatchTooLarge { .. }
                | ServerError::Engine(EngineError::InvalidRequest(_))
        )
    }

    /// Returns true if this is a server error (5xx).
    pub fn is_server_error(&self) -> bool {
        !self.is_client_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordsync_protocol::ProtocolError;
    use wordsync_store::StoreError;

    #[test]
    fn error_classification() {
        assert!(ServerError::InvalidRequest("bad".into()).is_client_error());
        assert!(ServerError::NotAuthorized("nope".into()).is_client_error());
        assert!(ServerError::BatchTooLarge {
            submitted: 900,
            max: 500
        }
        .is_client_error());
        assert!(
            ServerError::Engine(EngineError::InvalidRequest(ProtocolError::EmptyBatch))
                .is_client_error()
        );
        assert!(
            ServerError::Engine(EngineError::Store(StoreError::Unavailable("down".into())))
                .is_server_error()
        );
        assert!(ServerError::Internal("oops".into()).is_server_error());
    }

    #[test]
    fn error_display() {
        let err = ServerError::BatchTooLarge {
            submitted: 900,
            max: 500,
        };
        let msg = err.to_string();
        assert!(msg.contains("900"));
        assert!(msg.contains("500"));
    }
}
