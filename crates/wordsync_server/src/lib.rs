//! # WordSync Server
//!
//! Reference server shell around the WordSync engine.
//!
//! This crate provides:
//! - `ServerConfig` with batch-size and authentication settings
//! - HMAC-SHA256 bearer-token authentication (`TokenValidator`)
//! - `RequestHandler` with limit enforcement and stats
//! - `SyncServer`, the facade a transport layer calls into
//!
//! HTTP routing and schema middleware are out of scope: the handlers accept
//! already-decoded protocol messages. In a real deployment you would expose
//! endpoints that call `SyncServer::handle_push` / `handle_pull`.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod auth;
mod config;
mod error;
mod handler;
mod server;

pub use auth::{AuthConfig, TokenValidator};
pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::{HandlerContext, RequestHandler, ServerStats};
pub use server::SyncServer;
