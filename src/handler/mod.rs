//! Request handler module
//!
//! Responsible for request dispatch and the liveness handlers themselves.

pub mod dispatch;
pub mod views;

// Re-export main entry point
pub use dispatch::handle_request;
pub use views::{default_routes, health, ping, HEALTH_PATH, PING_PATH};
