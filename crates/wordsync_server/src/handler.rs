//! Request handlers for the sync endpoints.

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;
use wordsync_engine::SyncEngine;
use wordsync_protocol::{
    PullRequest, PullResponse, PushRequest, PushResponse, UserId, DEFAULT_PAGE_LIMIT,
    MAX_PAGE_LIMIT,
};
use wordsync_store::{ContentRegistry, ProgressStore};

/// Counters accumulated across handled requests.
#[derive(Debug, Clone, Default)]
pub struct ServerStats {
    /// Push requests handled.
    pub pushes: u64,
    /// Pull requests handled.
    pub pulls: u64,
    /// Items submitted across all pushes.
    pub items_submitted: u64,
    /// Rows actually written across all pushes.
    pub items_committed: u64,
}

/// Context shared by all request handling.
pub struct HandlerContext<S, R> {
    /// Server configuration.
    pub config: ServerConfig,
    engine: SyncEngine<S, R>,
    stats: RwLock<ServerStats>,
}

impl<S, R> HandlerContext<S, R>
where
    S: ProgressStore,
    R: ContentRegistry,
{
    /// Creates a new handler context.
    pub fn new(config: ServerConfig, engine: SyncEngine<S, R>) -> Self {
        Self {
            config,
            engine,
            stats: RwLock::new(ServerStats::default()),
        }
    }

    /// The engine this context delegates to.
    pub fn engine(&self) -> &SyncEngine<S, R> {
        &self.engine
    }

    /// A snapshot of the accumulated stats.
    pub fn stats(&self) -> ServerStats {
        self.stats.read().clone()
    }
}

/// Handler for sync requests.
pub struct RequestHandler<S, R> {
    context: Arc<HandlerContext<S, R>>,
}

impl<S, R> RequestHandler<S, R>
where
    S: ProgressStore,
    R: ContentRegistry,
{
    /// Creates a new request handler.
    pub fn new(context: Arc<HandlerContext<S, R>>) -> Self {
        Self { context }
    }

    /// Handles a push request for an authenticated user.
    pub fn handle_push(
        &self,
        user: &UserId,
        request: PushRequest,
    ) -> ServerResult<PushResponse> {
        let submitted = request.items.len();
        if submitted > self.context.config.max_push_batch as usize {
            return Err(ServerError::BatchTooLarge {
                submitted,
                max: self.context.config.max_push_batch,
            });
        }

        let response = self.context.engine.push(user, request)?;

        let mut stats = self.context.stats.write();
        stats.pushes += 1;
        stats.items_submitted += submitted as u64;
        stats.items_committed += response.synced_count;
        drop(stats);

        debug!(user = %user, submitted, committed = response.synced_count, "handled push");
        Ok(response)
    }

    /// Handles a pull request for an authenticated user.
    ///
    /// The requested (or defaulted) page size is clamped to the configured
    /// cap. Limits above the protocol maximum are left alone so the engine
    /// still rejects them as malformed input.
    pub fn handle_pull(
        &self,
        user: &UserId,
        request: PullRequest,
    ) -> ServerResult<PullResponse> {
        let cap = self.context.config.max_pull_limit;
        let request = match request.limit {
            Some(limit) if limit > MAX_PAGE_LIMIT => request,
            limit => PullRequest {
                limit: Some(limit.unwrap_or(DEFAULT_PAGE_LIMIT).min(cap)),
                ..request
            },
        };

        let response = self.context.engine.pull(user, request)?;

        self.context.stats.write().pulls += 1;
        debug!(user = %user, page = response.page, rows = response.data.len(), "handled pull");
        Ok(response)
    }
}
