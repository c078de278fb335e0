// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Config {
    pub server: ServerConfig,
    pub app: AppConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Tokio worker threads (defaults to CPU cores)
    #[serde(default)]
    pub workers: Option<usize>,
}

/// Application settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Debug mode: 404 responses list the route table
    pub debug: bool,
    /// Host header values accepted by the server; empty disables the check
    ///
    /// `"*"` accepts anything, `".example.com"` or `"*.example.com"` accept
    /// the domain and all of its subdomains.
    #[serde(default)]
    pub allowed_hosts: Vec<String>,
    /// Origins that receive `Access-Control-Allow-Origin` on JSON responses
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Emit structured JSON lines instead of the human-readable format
    #[serde(default)]
    pub json: bool,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct PerformanceConfig {
    /// Reuse connections for further requests (HTTP/1.1 keep-alive)
    pub keep_alive: bool,
    pub read_timeout: u64,
    pub write_timeout: u64,
    #[serde(default)]
    pub max_connections: Option<u64>,
    /// Seconds to wait for active connections on shutdown
    #[serde(default = "default_shutdown_grace")]
    pub shutdown_grace: u64,
}

#[allow(clippy::missing_const_for_fn)]
fn default_shutdown_grace() -> u64 {
    5
}

/// HTTP configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    pub server_name: String,
    /// Redirect `/ping` to `/ping/` when only the slashed route exists
    #[serde(default)]
    pub append_slash: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
                workers: None,
            },
            app: AppConfig {
                debug: false,
                allowed_hosts: Vec::new(),
                allowed_origins: Vec::new(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                access_log: true,
                access_log_format: default_access_log_format(),
                json: false,
            },
            performance: PerformanceConfig {
                keep_alive: true,
                read_timeout: 30,
                write_timeout: 30,
                max_connections: None,
                shutdown_grace: default_shutdown_grace(),
            },
            http: HttpConfig {
                server_name: "rust-pingserver/0.1".to_string(),
                append_slash: false,
            },
        }
    }
}
