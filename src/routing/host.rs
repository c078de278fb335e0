//! Host header validation
//!
//! Supports exact match, domain suffix (`.example.com` or `*.example.com`),
//! and catch-all (`*`). Validation is opt-in: an empty list disables it.

use crate::config::AppConfig;

/// Lowercased host patterns, or `None` when Host validation is disabled
pub fn effective_allowed_hosts(app: &AppConfig) -> Option<Vec<String>> {
    if app.allowed_hosts.is_empty() {
        return None;
    }
    Some(app.allowed_hosts.iter().map(|h| h.to_ascii_lowercase()).collect())
}

/// Check a Host header value against the allowed patterns
pub fn is_allowed_host(host: &str, allowed: &[String]) -> bool {
    let Some(domain) = split_domain(host) else {
        return false;
    };
    allowed.iter().any(|pattern| match_host(pattern, &domain))
}

/// Match a single pattern against a port-less, lowercased domain
pub fn match_host(pattern: &str, domain: &str) -> bool {
    if pattern == "*" {
        return true;
    }

    // "*.example.com" behaves like ".example.com"
    let pattern = pattern.strip_prefix('*').unwrap_or(pattern);

    if let Some(bare_domain) = pattern.strip_prefix('.') {
        // ".example.com" matches "example.com" and any subdomain
        return domain == bare_domain || domain.ends_with(pattern);
    }

    pattern == domain
}

/// Strip the port and lowercase the host
///
/// IPv6 literals keep their brackets (`[::1]:8000` -> `[::1]`). Returns
/// `None` for malformed values.
fn split_domain(host: &str) -> Option<String> {
    let host = host.trim().to_ascii_lowercase();
    if host.is_empty() {
        return None;
    }

    let (domain, port) = if host.starts_with('[') {
        let end = host.find(']')?;
        let (domain, rest) = host.split_at(end + 1);
        match rest.strip_prefix(':') {
            Some(port) => (domain.to_string(), Some(port.to_string())),
            None if rest.is_empty() => (domain.to_string(), None),
            None => return None,
        }
    } else {
        match host.rsplit_once(':') {
            Some((domain, port)) => (domain.to_string(), Some(port.to_string())),
            None => (host.clone(), None),
        }
    };

    if let Some(port) = port {
        if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
    }
    let domain = domain.strip_suffix('.').unwrap_or(&domain).to_string();
    if domain.is_empty() {
        return None;
    }
    Some(domain)
}
