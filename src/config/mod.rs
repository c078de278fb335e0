// Configuration module entry point
// Loads the startup configuration and holds the shared runtime state

mod state;
mod types;
mod validate;

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File};
use std::net::SocketAddr;

use crate::error::ServerError;

// Re-export public types
pub use state::AppState;
pub use types::{AppConfig, Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig};

/// Environment variable prefix, e.g. `PINGSERVER_SERVER__PORT=9000`
const ENV_PREFIX: &str = "PINGSERVER";

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(config_path: &str) -> Result<Self, ServerError> {
        let settings = Self::builder_with_defaults()?
            .add_source(File::with_name(config_path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("app.allowed_hosts")
                    .with_list_parse_key("app.allowed_origins")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Builder pre-populated with every default, ready for extra sources
    pub(crate) fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let d = Self::default();
        config::Config::builder()
            .set_default("server.host", d.server.host)?
            .set_default("server.port", i64::from(d.server.port))?
            .set_default("app.debug", d.app.debug)?
            .set_default("app.allowed_hosts", d.app.allowed_hosts)?
            .set_default("app.allowed_origins", d.app.allowed_origins)?
            .set_default("logging.level", d.logging.level)?
            .set_default("logging.access_log", d.logging.access_log)?
            .set_default("logging.access_log_format", d.logging.access_log_format)?
            .set_default("logging.json", d.logging.json)?
            .set_default("performance.keep_alive", d.performance.keep_alive)?
            .set_default("performance.read_timeout", d.performance.read_timeout)?
            .set_default("performance.write_timeout", d.performance.write_timeout)?
            .set_default("performance.shutdown_grace", d.performance.shutdown_grace)?
            .set_default("http.server_name", d.http.server_name)?
            .set_default("http.append_slash", d.http.append_slash)
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, ServerError> {
        let addr = if self.server.host.contains(':') && !self.server.host.starts_with('[') {
            format!("[{}]:{}", self.server.host, self.server.port)
        } else {
            format!("{}:{}", self.server.host, self.server.port)
        };
        addr.parse()
            .map_err(|source| ServerError::Address { addr, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn parse(toml: &str) -> Config {
        Config::builder_with_defaults()
            .unwrap()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults_without_file() {
        let cfg = parse("");
        assert_eq!(cfg, Config::default());
        assert!(!cfg.app.debug);
        assert!(!cfg.app.allowed_hosts.iter().any(|h| h == "*"));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let cfg = parse(
            r#"
            [server]
            port = 9100
            workers = 2

            [app]
            debug = true
            allowed_hosts = ["api.example.com"]
            allowed_origins = ["https://app.example.com"]

            [performance]
            max_connections = 64

            [http]
            append_slash = true
            "#,
        );
        assert_eq!(cfg.server.port, 9100);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.workers, Some(2));
        assert!(cfg.app.debug);
        assert_eq!(cfg.app.allowed_hosts, vec!["api.example.com".to_string()]);
        assert_eq!(cfg.app.allowed_origins.len(), 1);
        assert_eq!(cfg.performance.max_connections, Some(64));
        assert_eq!(cfg.performance.read_timeout, 30);
        assert!(cfg.http.append_slash);
    }

    // Only test in the crate touching PINGSERVER_* variables
    #[test]
    fn test_env_overrides_defaults() {
        std::env::set_var("PINGSERVER_SERVER__PORT", "9001");
        std::env::set_var("PINGSERVER_APP__ALLOWED_HOSTS", "localhost,health.internal");
        std::env::set_var("PINGSERVER_APP__ALLOWED_ORIGINS", "https://a.dev");

        let loaded = Config::load_from("/nonexistent/pingserver-env-test");

        std::env::remove_var("PINGSERVER_SERVER__PORT");
        std::env::remove_var("PINGSERVER_APP__ALLOWED_HOSTS");
        std::env::remove_var("PINGSERVER_APP__ALLOWED_ORIGINS");

        let cfg = loaded.unwrap();
        assert_eq!(cfg.server.port, 9001);
        assert_eq!(
            cfg.app.allowed_hosts,
            vec!["localhost".to_string(), "health.internal".to_string()]
        );
        assert_eq!(cfg.app.allowed_origins, vec!["https://a.dev".to_string()]);
        assert_eq!(cfg.server.host, "127.0.0.1");
    }

    #[test]
    fn test_get_socket_addr() {
        let mut cfg = Config::default();
        assert_eq!(cfg.get_socket_addr().unwrap().to_string(), "127.0.0.1:8000");

        cfg.server.host = "::1".to_string();
        assert_eq!(cfg.get_socket_addr().unwrap().to_string(), "[::1]:8000");

        cfg.server.host = "not an address".to_string();
        assert!(matches!(
            cfg.get_socket_addr(),
            Err(ServerError::Address { .. })
        ));
    }
}
