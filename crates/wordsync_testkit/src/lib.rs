//! # WordSync Testkit
//!
//! Test utilities shared by the WordSync crates:
//! - Fixtures: seeded registries, engines, and servers
//! - Fault injection: a progress store that fails on command
//! - Generators: proptest strategies for protocol values

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod flaky;
pub mod generators;

pub use fixtures::{seeded_engine, seeded_registry, seeded_server, test_content, test_item};
pub use flaky::FlakyProgressStore;
