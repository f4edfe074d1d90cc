//! The sync engine facade.

use crate::committer::commit_plan;
use crate::error::EngineResult;
use crate::exporter::export_page;
use crate::merge::classify;
use crate::validator::filter_known;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;
use wordsync_protocol::{
    PullRequest, PullResponse, PushRequest, PushResponse, UserId, WordId, WordProgress,
};
use wordsync_store::{ContentRegistry, ProgressStore};

/// The progress synchronization engine.
///
/// Stateless between calls: all durable state lives in the progress store.
/// Push and pull for different users are fully independent; within one push
/// the stages are causally ordered but take no locks beyond the store's
/// atomic commit boundary. Concurrent pushes for the same `(user, word)`
/// are made commutative by the merge guard plus the store's
/// insert-if-absent creates, so final state is race-free regardless of
/// arrival order.
pub struct SyncEngine<S, R> {
    store: Arc<S>,
    registry: Arc<R>,
}

impl<S, R> SyncEngine<S, R>
where
    S: ProgressStore,
    R: ContentRegistry,
{
    /// Creates an engine over the given store and registry.
    pub fn new(store: Arc<S>, registry: Arc<R>) -> Self {
        Self { store, registry }
    }

    /// The underlying progress store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// The underlying content registry.
    pub fn registry(&self) -> &Arc<R> {
        &self.registry
    }

    /// Push direction: validate → filter → merge → commit.
    ///
    /// Unknown words and stale or regressive items never fail the call;
    /// they only lower `syncedCount`. A store failure fails the whole push
    /// with nothing committed, and retrying the identical batch is safe:
    /// already-applied items fall into the equal-timestamp discard branch.
    pub fn push(&self, user: &UserId, request: PushRequest) -> EngineResult<PushResponse> {
        request.validate()?;
        let synced_at = now_millis();
        let submitted = request.items.len();

        let valid = filter_known(self.registry.as_ref(), request.items)?;
        if valid.is_empty() {
            return Ok(PushResponse::new(0, synced_at));
        }

        let distinct: Vec<WordId> = valid
            .iter()
            .map(|item| item.word_id.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let existing: HashMap<WordId, WordProgress> = self
            .store
            .fetch_existing(user, &distinct)?
            .into_iter()
            .map(|row| (row.word_id.clone(), row))
            .collect();

        let plan = classify(valid, &existing);
        let written = commit_plan(self.store.as_ref(), user, plan)?;

        info!(user = %user, submitted, written, "push complete");
        Ok(PushResponse::new(written, synced_at))
    }

    /// Pull direction: one cursor-filtered, content-denormalized page.
    pub fn pull(&self, user: &UserId, request: PullRequest) -> EngineResult<PullResponse> {
        let params = request.validate()?;
        export_page(self.store.as_ref(), self.registry.as_ref(), user, &params)
    }
}

/// Current server time in milliseconds since the Unix epoch.
fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}
