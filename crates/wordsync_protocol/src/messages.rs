//! Protocol messages for the push and pull directions.

use crate::content::WordContent;
use crate::error::{ProtocolError, ProtocolResult};
use crate::progress::{ProgressItem, WordProgress};
use serde::{Deserialize, Serialize};

/// Page size used when a pull request does not specify one.
pub const DEFAULT_PAGE_LIMIT: u32 = 50;

/// Largest page size a pull request may ask for.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Push request: a batch of client-reported progress items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushRequest {
    /// Reported items. At least one; duplicates of a word id are allowed
    /// (retries) and reconciled by the merge engine.
    pub items: Vec<ProgressItem>,
}

impl PushRequest {
    /// Creates a push request.
    pub fn new(items: Vec<ProgressItem>) -> Self {
        Self { items }
    }

    /// Shape-checks the batch: non-empty, every item in range.
    pub fn validate(&self) -> ProtocolResult<()> {
        if self.items.is_empty() {
            return Err(ProtocolError::EmptyBatch);
        }
        for item in &self.items {
            item.validate()?;
        }
        Ok(())
    }
}

/// Push response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushResponse {
    /// Always true when the push ran; failures are transported as errors.
    pub success: bool,
    /// Number of rows the engine chose to write (created + updated).
    /// Dropped and discarded items reduce this below the submitted count.
    pub synced_count: u64,
    /// Server time of this sync operation, ms since epoch.
    pub synced_at: i64,
}

impl PushResponse {
    /// Creates a successful push response.
    pub fn new(synced_count: u64, synced_at: i64) -> Self {
        Self {
            success: true,
            synced_count,
            synced_at,
        }
    }
}

/// Pull request: cursor-filtered, paginated export of a user's progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequest {
    /// Cursor: only rows with `last_reviewed` strictly greater are returned.
    /// Absent, null, or zero means full sync (first login).
    #[serde(default)]
    pub last_sync_time: Option<i64>,
    /// 1-based page number. Defaults to 1.
    #[serde(default)]
    pub page: Option<u32>,
    /// Page size, 1..=100. Defaults to 50.
    #[serde(default)]
    pub limit: Option<u32>,
}

impl PullRequest {
    /// Creates a pull request for one page at a cursor.
    pub fn new(last_sync_time: Option<i64>, page: u32, limit: u32) -> Self {
        Self {
            last_sync_time,
            page: Some(page),
            limit: Some(limit),
        }
    }

    /// A full-sync request with default pagination.
    pub fn full_sync() -> Self {
        Self::default()
    }

    /// Validates and normalizes into concrete paging parameters.
    pub fn validate(&self) -> ProtocolResult<PageParams> {
        let page = self.page.unwrap_or(1);
        if page == 0 {
            return Err(ProtocolError::PageOutOfRange);
        }
        let limit = self.limit.unwrap_or(DEFAULT_PAGE_LIMIT);
        if limit == 0 || limit > MAX_PAGE_LIMIT {
            return Err(ProtocolError::LimitOutOfRange(limit));
        }
        let since = match self.last_sync_time {
            Some(t) if t < 0 => {
                return Err(ProtocolError::NonPositiveTimestamp {
                    field: "lastSyncTime",
                    value: t,
                });
            }
            Some(0) | None => None,
            Some(t) => Some(t),
        };
        Ok(PageParams { since, page, limit })
    }
}

/// Normalized paging parameters produced by [`PullRequest::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    /// Cursor timestamp; `None` means full sync.
    pub since: Option<i64>,
    /// 1-based page number.
    pub page: u32,
    /// Page size, 1..=100.
    pub limit: u32,
}

impl PageParams {
    /// Row offset of this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

/// A progress row joined with its content snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressWithContent {
    /// The stored progress row.
    #[serde(flatten)]
    pub progress: WordProgress,
    /// Static content for the row's word.
    #[serde(flatten)]
    pub content: WordContent,
}

/// Pull response: one page plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullResponse {
    /// The page of rows, ordered by `(last_reviewed, word_id)` ascending.
    pub data: Vec<ProgressWithContent>,
    /// Echoed page number.
    pub page: u32,
    /// Echoed page size.
    pub limit: u32,
    /// Total rows matching the cursor across all pages.
    pub total: u64,
    /// Total page count for this cursor and limit.
    pub total_pages: u32,
    /// Whether pages beyond this one exist.
    pub has_more: bool,
}

impl PullResponse {
    /// Assembles a response page, deriving the pagination metadata.
    pub fn new(data: Vec<ProgressWithContent>, params: &PageParams, total: u64) -> Self {
        let limit = u64::from(params.limit);
        let total_pages = (total.div_ceil(limit)) as u32;
        Self {
            data,
            page: params.page,
            limit: params.limit,
            total,
            total_pages,
            has_more: params.page < total_pages,
        }
    }
}
