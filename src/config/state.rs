// Application state module
// Immutable state shared by every connection

use super::types::Config;
use crate::routing::{effective_allowed_hosts, Router};

/// Application state
///
/// Built once at startup and shared behind an `Arc`; nothing in here is
/// mutated afterwards, so request handling needs no locks.
pub struct AppState {
    pub config: Config,
    pub router: Router,
    /// Normalised Host patterns; `None` accepts any Host
    pub allowed_hosts: Option<Vec<String>>,
}

impl AppState {
    pub fn new(config: Config, router: Router) -> Self {
        let allowed_hosts = effective_allowed_hosts(&config.app);
        Self {
            config,
            router,
            allowed_hosts,
        }
    }
}
