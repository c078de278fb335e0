//! Error types
//!
//! `RouteError` covers the route table: duplicate registration at boot and
//! unmatched lookups at request time. `ServerError` is what startup returns.

use thiserror::Error;

/// Route table errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The (method, path) pair was already registered. Fatal at boot.
    #[error("route already registered: {method} {path}")]
    Configuration { method: String, path: String },

    /// No route matches the (method, path) pair. Surfaced as 404.
    #[error("no route for {method} {path}")]
    NotFound { method: String, path: String },
}

/// Startup and serving errors
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("invalid listen address '{addr}': {source}")]
    Address {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("failed to initialise logging: {0}")]
    Logging(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Route(#[from] RouteError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_error_messages() {
        let dup = RouteError::Configuration {
            method: "GET".to_string(),
            path: "/ping/".to_string(),
        };
        assert_eq!(dup.to_string(), "route already registered: GET /ping/");

        let missing = RouteError::NotFound {
            method: "POST".to_string(),
            path: "/ping/".to_string(),
        };
        assert_eq!(missing.to_string(), "no route for POST /ping/");
    }

    #[test]
    fn test_server_error_wraps_route_error() {
        let err: ServerError = RouteError::Configuration {
            method: "GET".to_string(),
            path: "/health/".to_string(),
        }
        .into();
        assert!(matches!(err, ServerError::Route(_)));
        assert_eq!(err.to_string(), "route already registered: GET /health/");
    }
}
