//! Liveness handlers
//!
//! Pure, total functions: no inputs, no side effects, same output every call.

use hyper::Method;

use crate::error::RouteError;
use crate::http::Payload;
use crate::routing::Router;

pub const PING_PATH: &str = "/ping/";
pub const HEALTH_PATH: &str = "/health/";

/// `GET /ping/`
pub fn ping() -> Payload {
    Payload::new().with("message", "pong")
}

/// `GET /health/`
pub fn health() -> Payload {
    Payload::new().with("status", "ok")
}

/// Build and freeze the standard route table
pub fn default_routes() -> Result<Router, RouteError> {
    let mut builder = Router::builder();
    builder
        .register(Method::GET, PING_PATH, ping)?
        .register(Method::GET, HEALTH_PATH, health)?;
    Ok(builder.freeze())
}
