//! # WordSync Store
//!
//! Storage contracts for the WordSync engine, plus in-memory reference
//! implementations.
//!
//! This crate provides:
//! - `ProgressStore`: the progress-row collaborator (batched reads, atomic
//!   batch commits with insert-if-absent creates, cursor-filtered paging)
//! - `ContentRegistry`: the known-word set and content-snapshot collaborator
//! - `MemoryProgressStore` / `MemoryContentRegistry` reference backends
//!
//! The durable store is an external collaborator of the sync engine; the
//! engine depends only on the traits here. A SQL-backed deployment
//! implements the same contracts (`commit` maps to one transaction with an
//! `ON CONFLICT DO NOTHING` bulk insert plus per-row updates).
//!
//! ## Key invariants
//!
//! - At most one row per `(user_id, word_id)`; rows are never deleted
//! - `commit` is all-or-nothing on the batch boundary
//! - Creates are insert-if-absent: a concurrent create of the same row
//!   loses silently instead of failing the batch
//! - Paged reads order by `(last_reviewed, word_id)` ascending, so a fixed
//!   cursor yields a stable, gap-free, duplicate-free traversal

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod memory;
mod progress;
mod registry;

pub use error::{StoreError, StoreResult};
pub use memory::{MemoryContentRegistry, MemoryProgressStore};
pub use progress::{CommitBatch, ProgressStore};
pub use registry::ContentRegistry;
