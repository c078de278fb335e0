//! Request dispatch module
//!
//! Entry point for HTTP request processing: host validation, route
//! resolution, response building and access logging.

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Request, Response, StatusCode, Version};
use std::net::SocketAddr;
use std::time::Instant;

use crate::config::AppState;
use crate::http::{self, RouteRequest};
use crate::logger::{self, AccessLogEntry};
use crate::routing::is_allowed_host;

/// Main entry point for HTTP request handling
///
/// The request body is never read, so any body type is accepted.
pub fn handle_request<B>(
    req: &Request<B>,
    state: &AppState,
    peer_addr: SocketAddr,
) -> Response<Full<Bytes>> {
    let started = Instant::now();
    let route_req = RouteRequest::from_hyper(req);

    let response = route_request(&route_req, state);

    if state.config.logging.access_log {
        log_access(&route_req, &response, peer_addr, started, state);
    }
    response
}

/// Route a typed request to its handler
pub fn route_request(req: &RouteRequest, state: &AppState) -> Response<Full<Bytes>> {
    let server_name = state.config.http.server_name.as_str();

    // 1. Host header must be allowed, when a host list is configured
    if let Some(allowed) = &state.allowed_hosts {
        let host_ok = req
            .host
            .as_deref()
            .is_some_and(|host| is_allowed_host(host, allowed));
        if !host_ok {
            tracing::debug!(
                host = req.host.as_deref().unwrap_or(""),
                "Host header rejected, not in app.allowed_hosts"
            );
            return http::build_400_response(server_name);
        }
    }

    // 2. Exact (method, path) match
    match state.router.resolve(&req.method, &req.path) {
        Ok(handler) => {
            let payload = handler();
            let cors_origin = cors_origin(req.origin.as_deref(), &state.config.app.allowed_origins);
            http::build_json_response(&payload, cors_origin, server_name)
        }
        Err(err) => {
            // 3. Optional redirect to the slashed path
            if let Some(target) = append_slash_target(req, state) {
                return http::build_redirect_response_with_code(
                    &target,
                    StatusCode::MOVED_PERMANENTLY,
                    server_name,
                );
            }
            tracing::debug!(error = %err, "route not found");
            http::build_404_response(
                state.config.app.debug,
                &req.path,
                state.router.routes(),
                server_name,
            )
        }
    }
}

/// Origin to echo back, if the request origin is allowed
fn cors_origin<'a>(origin: Option<&'a str>, allowed: &'a [String]) -> Option<&'a str> {
    let origin = origin?;
    if allowed.iter().any(|o| o == "*") {
        return Some("*");
    }
    allowed.iter().any(|o| o == origin).then_some(origin)
}

/// Redirect target when only the slashed variant of the path is routed
fn append_slash_target(req: &RouteRequest, state: &AppState) -> Option<String> {
    if !state.config.http.append_slash || req.path.ends_with('/') {
        return None;
    }
    let slashed = format!("{}/", req.path);
    state.router.resolve(&req.method, &slashed).ok()?;
    Some(match &req.query {
        Some(q) => format!("{slashed}?{q}"),
        None => slashed,
    })
}

fn log_access(
    req: &RouteRequest,
    response: &Response<Full<Bytes>>,
    peer_addr: SocketAddr,
    started: Instant,
    state: &AppState,
) {
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method.to_string(),
        req.path.clone(),
    );
    entry.query.clone_from(&req.query);
    entry.http_version = version_str(req.version).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
    entry.referer.clone_from(&req.referer);
    entry.user_agent.clone_from(&req.user_agent);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

    logger::log_access(&entry, &state.config.logging.access_log_format);
}

const fn version_str(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
