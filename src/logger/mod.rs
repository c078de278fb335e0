//! Logger module
//!
//! Provides logging utilities for the HTTP server including:
//! - Subscriber setup (`tracing-subscriber`, text or JSON)
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error and warning logging

mod format;

pub use format::AccessLogEntry;

use std::net::SocketAddr;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{Config, LoggingConfig};
use crate::error::ServerError;
use crate::routing::Router;

/// Target used for access log lines, e.g. `RUST_LOG=access=off`
pub const ACCESS_TARGET: &str = "access";

/// Initialize the global subscriber
///
/// Should be called once at application startup. `RUST_LOG` takes
/// precedence over `logging.level`.
pub fn init(config: &LoggingConfig) -> Result<(), ServerError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| ServerError::Logging(format!("invalid level '{}': {e}", config.level)))?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };
    result.map_err(|e| ServerError::Logging(e.to_string()))
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    tracing::info!(
        %addr,
        workers = ?config.server.workers,
        debug = config.app.debug,
        max_connections = ?config.performance.max_connections,
        "server started, listening on http://{addr}"
    );
}

pub fn log_route_table(router: &Router) {
    for route in router.routes() {
        tracing::info!(method = %route.method, path = %route.path, "route registered");
    }
}

pub fn log_config_warning(message: &str) {
    tracing::warn!("[CONFIG] {message}");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    tracing::debug!(peer = %peer_addr, "connection accepted");
}

pub fn log_connection_rejected(peer_addr: &SocketAddr, active: usize, max: u64) {
    tracing::warn!(
        peer = %peer_addr,
        "max connections reached: {active}/{max}, connection rejected"
    );
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    tracing::error!("failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    tracing::error!("{message}");
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    tracing::info!(target: ACCESS_TARGET, "{}", entry.format(format));
}

pub fn log_shutdown_requested(signal: &str) {
    tracing::info!("{signal} received, initiating graceful shutdown");
}

pub fn log_shutdown_complete(remaining: usize) {
    if remaining == 0 {
        tracing::info!("all connections drained, server stopped");
    } else {
        tracing::warn!("shutdown grace period elapsed with {remaining} connection(s) still open");
    }
}
