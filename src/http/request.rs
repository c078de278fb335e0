//! Typed request view
//!
//! Converted from `hyper::Request` as soon as a request arrives. The body is
//! never read: no route depends on it.

use hyper::header::{HOST, ORIGIN, REFERER, USER_AGENT};
use hyper::{HeaderMap, Method, Request, Version};

/// The parts of an HTTP request the router and access log look at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub host: Option<String>,
    pub origin: Option<String>,
    pub referer: Option<String>,
    pub user_agent: Option<String>,
    pub version: Version,
}

impl RouteRequest {
    pub fn from_hyper<B>(req: &Request<B>) -> Self {
        let uri = req.uri();
        let headers = req.headers();

        // HTTP/2 and absolute-form requests carry the host in the URI
        let host = header_str(headers, HOST).or_else(|| {
            uri.authority().map(|a| a.as_str().to_string())
        });

        Self {
            method: req.method().clone(),
            path: uri.path().to_string(),
            query: uri.query().map(ToString::to_string),
            host,
            origin: header_str(headers, ORIGIN),
            referer: header_str(headers, REFERER),
            user_agent: header_str(headers, USER_AGENT),
            version: req.version(),
        }
    }
}

fn header_str(headers: &HeaderMap, name: hyper::header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}
