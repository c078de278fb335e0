//! Routing module
//!
//! Provides:
//! - The exact-match route table, built at startup and frozen
//! - Host header validation against the allowed hosts

mod host;
mod router;

pub use host::{effective_allowed_hosts, is_allowed_host};
pub use router::{Handler, Route, Router, RouterBuilder};
