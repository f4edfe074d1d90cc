//! Cursor-filtered, paginated, content-denormalized export (the pull side).

use crate::error::EngineResult;
use tracing::warn;
use wordsync_protocol::{PageParams, ProgressWithContent, PullResponse, UserId, WordId};
use wordsync_store::{ContentRegistry, ProgressStore};

/// Serves one page of a user's progress, joined with content snapshots.
///
/// Rows are ordered by `(last_reviewed, word_id)` ascending. The ordering
/// is load-bearing: a client paging through all pages at a fixed cursor
/// sees every row that existed at query time exactly once, even while new
/// reviews land concurrently — fresh writes carry larger timestamps and can
/// only appear past the tail of the traversal, never inside consumed pages.
pub fn export_page<S, R>(
    store: &S,
    registry: &R,
    user: &UserId,
    params: &PageParams,
) -> EngineResult<PullResponse>
where
    S: ProgressStore + ?Sized,
    R: ContentRegistry + ?Sized,
{
    let total = store.count_since(user, params.since)?;
    let rows = store.page_since(user, params.since, params.offset(), params.limit)?;

    let ids: Vec<WordId> = rows.iter().map(|row| row.word_id.clone()).collect();
    let mut content = registry.content_for(&ids)?;

    let mut data = Vec::with_capacity(rows.len());
    for row in rows {
        match content.remove(&row.word_id) {
            Some(snapshot) => data.push(ProgressWithContent {
                progress: row,
                content: snapshot,
            }),
            None => {
                // A word retired from the registry after progress was
                // recorded; the row is unrenderable, so leave it out.
                warn!(user = %user, word_id = %row.word_id, "progress row has no registry content");
            }
        }
    }

    Ok(PullResponse::new(data, params, total))
}
