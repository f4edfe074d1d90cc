//! Error types for storage backends.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors a storage backend can report.
///
/// Any error from [`crate::ProgressStore::commit`] means the whole batch was
/// rolled back; callers retry the entire push.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backend rejected or failed the operation.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// The backend is temporarily unreachable.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StoreError::Backend("row too large".into());
        assert_eq!(err.to_string(), "storage backend error: row too large");
    }
}
