//! Configuration validation
//!
//! Semantic checks that serde cannot express. Hard errors abort startup;
//! warnings are returned so the caller can log them once logging is up.

use super::types::Config;
use crate::error::ServerError;

const BUILTIN_ACCESS_FORMATS: [&str; 3] = ["combined", "common", "json"];

impl Config {
    /// Validate the configuration, returning non-fatal warnings on success
    pub fn validate(&self) -> Result<Vec<String>, ServerError> {
        let mut errors = Vec::new();

        if self.server.host.trim().is_empty() {
            errors.push("server.host must not be empty".to_string());
        }
        if self.server.workers == Some(0) {
            errors.push("server.workers must be at least 1".to_string());
        }
        if self.performance.read_timeout == 0 {
            errors.push("performance.read_timeout must be greater than 0".to_string());
        }
        if self.performance.write_timeout == 0 {
            errors.push("performance.write_timeout must be greater than 0".to_string());
        }
        let format = self.logging.access_log_format.as_str();
        if !BUILTIN_ACCESS_FORMATS.contains(&format) && !format.contains('$') {
            errors.push(format!(
                "logging.access_log_format '{format}' is neither combined, common, json nor a $variable pattern"
            ));
        }

        if !errors.is_empty() {
            return Err(ServerError::Invalid(errors.join("; ")));
        }

        let mut warnings = Vec::new();
        if self.app.debug {
            warnings.push(
                "app.debug is enabled: 404 responses expose the route table".to_string(),
            );
        }
        if self.app.allowed_hosts.iter().any(|h| h == "*") {
            warnings.push("app.allowed_hosts contains '*': any Host header is accepted".to_string());
        }
        Ok(warnings)
    }
}
