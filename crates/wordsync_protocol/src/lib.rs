//! # WordSync Protocol
//!
//! Wire and data types for the WordSync progress synchronization protocol.
//!
//! This crate provides:
//! - `ProgressItem` and `WordProgress` for per-word learning progress
//! - `WordContent` / `QuizItem` content snapshots for offline review
//! - Protocol messages (Push, Pull) with input-shape validation
//!
//! This is a pure data crate with no I/O operations. Validation here covers
//! shape and range only; referential checks (does a word exist?) belong to
//! the engine.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod content;
mod error;
mod messages;
mod progress;

pub use content::{QuizItem, WordContent};
pub use error::{ProtocolError, ProtocolResult};
pub use messages::{
    PageParams, ProgressWithContent, PullRequest, PullResponse, PushRequest, PushResponse,
    DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT,
};
pub use progress::{ProgressItem, UserId, WordId, WordProgress, REVIEW_LEVEL_MAX};
