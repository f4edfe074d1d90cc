//! Main sync server facade.

use crate::auth::{AuthConfig, TokenValidator};
use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::{HandlerContext, RequestHandler, ServerStats};
use std::sync::Arc;
use wordsync_engine::SyncEngine;
use wordsync_protocol::{PullRequest, PullResponse, PushRequest, PushResponse, UserId};
use wordsync_store::{ContentRegistry, MemoryContentRegistry, MemoryProgressStore, ProgressStore};

/// The sync server.
///
/// Wraps the engine with configuration, authentication, and stats. A
/// transport layer (HTTP, test harness) decodes requests and calls the
/// `handle_*` methods, or the `*_authenticated` variants with a raw bearer
/// token.
///
/// # Example
///
/// ```
/// use wordsync_server::{ServerConfig, SyncServer};
///
/// let server = SyncServer::in_memory(ServerConfig::default());
/// // Expose endpoints that call server.handle_push() / handle_pull().
/// ```
pub struct SyncServer<S = MemoryProgressStore, R = MemoryContentRegistry> {
    handler: RequestHandler<S, R>,
    context: Arc<HandlerContext<S, R>>,
    store: Arc<S>,
    registry: Arc<R>,
    validator: Option<TokenValidator>,
}

impl SyncServer<MemoryProgressStore, MemoryContentRegistry> {
    /// Creates a server backed by fresh in-memory stores.
    pub fn in_memory(config: ServerConfig) -> Self {
        Self::with_stores(
            config,
            Arc::new(MemoryProgressStore::new()),
            Arc::new(MemoryContentRegistry::new()),
        )
    }
}

impl<S, R> SyncServer<S, R>
where
    S: ProgressStore,
    R: ContentRegistry,
{
    /// Creates a server over existing store and registry collaborators.
    pub fn with_stores(config: ServerConfig, store: Arc<S>, registry: Arc<R>) -> Self {
        let validator = config.auth_secret.clone().map(|secret| {
            TokenValidator::new(AuthConfig::new(secret).with_expiry(config.token_expiry))
        });
        let engine = SyncEngine::new(Arc::clone(&store), Arc::clone(&registry));
        let context = Arc::new(HandlerContext::new(config, engine));
        let handler = RequestHandler::new(Arc::clone(&context));

        Self {
            handler,
            context,
            store,
            registry,
            validator,
        }
    }

    /// Handles a push for an externally-authenticated user.
    pub fn handle_push(&self, user: &UserId, request: PushRequest) -> ServerResult<PushResponse> {
        self.check_auth_not_required()?;
        self.handler.handle_push(user, request)
    }

    /// Handles a pull for an externally-authenticated user.
    pub fn handle_pull(&self, user: &UserId, request: PullRequest) -> ServerResult<PullResponse> {
        self.check_auth_not_required()?;
        self.handler.handle_pull(user, request)
    }

    /// Authenticates a bearer token and handles the push as that user.
    pub fn push_authenticated(
        &self,
        token: &str,
        request: PushRequest,
    ) -> ServerResult<PushResponse> {
        let user = self.authenticate(token)?;
        self.handler.handle_push(&user, request)
    }

    /// Authenticates a bearer token and handles the pull as that user.
    pub fn pull_authenticated(
        &self,
        token: &str,
        request: PullRequest,
    ) -> ServerResult<PullResponse> {
        let user = self.authenticate(token)?;
        self.handler.handle_pull(&user, request)
    }

    /// Resolves a bearer token to a user identity.
    pub fn authenticate(&self, token: &str) -> ServerResult<UserId> {
        match &self.validator {
            Some(validator) => validator.authenticate(token),
            None => Err(ServerError::NotAuthorized(
                "authentication is not configured".into(),
            )),
        }
    }

    /// Issues a token for a user (for tests and bootstrap tooling).
    pub fn issue_token(&self, user: &UserId) -> ServerResult<String> {
        match &self.validator {
            Some(validator) => Ok(validator.issue(user)),
            None => Err(ServerError::NotAuthorized(
                "authentication is not configured".into(),
            )),
        }
    }

    /// The underlying progress store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// The underlying content registry.
    pub fn registry(&self) -> &Arc<R> {
        &self.registry
    }

    /// A snapshot of the accumulated stats.
    pub fn stats(&self) -> ServerStats {
        self.context.stats()
    }

    fn check_auth_not_required(&self) -> ServerResult<()> {
        if self.context.config.require_auth {
            return Err(ServerError::NotAuthorized(
                "this server requires a bearer token".into(),
            ));
        }
        Ok(())
    }
}
