//! Server configuration.

use std::time::Duration;
use wordsync_protocol::MAX_PAGE_LIMIT;

/// Configuration for the sync server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Maximum number of items accepted in one push batch.
    pub max_push_batch: u32,
    /// Cap applied to pull page sizes (never above the protocol's 100).
    pub max_pull_limit: u32,
    /// Whether requests must carry a bearer token.
    pub require_auth: bool,
    /// Secret key for token signatures (if auth enabled).
    pub auth_secret: Option<Vec<u8>>,
    /// Token lifetime.
    pub token_expiry: Duration,
}

impl ServerConfig {
    /// Creates a configuration with defaults.
    pub fn new() -> Self {
        Self {
            max_push_batch: 500,
            max_pull_limit: MAX_PAGE_LIMIT,
            require_auth: false,
            auth_secret: None,
            token_expiry: Duration::from_secs(24 * 60 * 60),
        }
    }

    /// Sets the maximum push batch size.
    pub fn with_max_push_batch(mut self, size: u32) -> Self {
        self.max_push_batch = size;
        self
    }

    /// Sets the pull page-size cap (clamped to the protocol maximum).
    pub fn with_max_pull_limit(mut self, limit: u32) -> Self {
        self.max_pull_limit = limit.min(MAX_PAGE_LIMIT);
        self
    }

    /// Enables authentication with the given secret.
    pub fn with_auth(mut self, secret: Vec<u8>) -> Self {
        self.require_auth = true;
        self.auth_secret = Some(secret);
        self
    }

    /// Sets the token lifetime.
    pub fn with_token_expiry(mut self, expiry: Duration) -> Self {
        self.token_expiry = expiry;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new()
    }
}
