//! Liveness HTTP server
//!
//! Serves a fixed route table (`GET /ping/`, `GET /health/`) that is built
//! once at startup and frozen. Everything else answers 404.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod routing;
pub mod server;

pub use crate::config::{AppState, Config};
pub use crate::error::{RouteError, ServerError};
pub use crate::http::Payload;
pub use crate::routing::{Router, RouterBuilder};
