//! HTTP response building module
//!
//! Provides builders for the status codes the server emits. Every response
//! carries the configured `Server` header.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{
    ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_LENGTH, CONTENT_TYPE, LOCATION, SERVER, VARY,
};
use hyper::{Response, StatusCode};

use super::payload::Payload;
use crate::routing::Route;

/// Build 200 JSON response from a handler payload
///
/// `cors_origin` is echoed in `Access-Control-Allow-Origin` when set.
pub fn build_json_response(
    payload: &Payload,
    cors_origin: Option<&str>,
    server_name: &str,
) -> Response<Full<Bytes>> {
    let body = match payload.to_json() {
        Ok(body) => body,
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            return build_500_response(server_name);
        }
    };

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(SERVER, server_name)
        .header(CONTENT_TYPE, "application/json")
        .header(CONTENT_LENGTH, body.len());

    if let Some(origin) = cors_origin {
        builder = builder
            .header(ACCESS_CONTROL_ALLOW_ORIGIN, origin)
            .header(VARY, "Origin");
    }

    builder.body(Full::new(Bytes::from(body))).unwrap_or_else(|e| {
        log_build_error("200", &e);
        build_500_response(server_name)
    })
}

/// Build 404 Not Found response
///
/// In debug mode the body lists every route that was tried.
pub fn build_404_response<'a>(
    debug: bool,
    path: &str,
    routes: impl Iterator<Item = &'a Route>,
    server_name: &str,
) -> Response<Full<Bytes>> {
    let body = if debug {
        let mut body = format!("Page not found (404)\nRequest path: {path}\n\nRoutes tried:\n");
        for route in routes {
            body.push_str(&format!("  {} {}\n", route.method, route.path));
        }
        body.push_str("\nYou're seeing this because app.debug = true.\n");
        body
    } else {
        "Not Found".to_string()
    };

    plain_response(StatusCode::NOT_FOUND, body, server_name)
}

/// Build 400 Bad Request response for disallowed Host headers
pub fn build_400_response(server_name: &str) -> Response<Full<Bytes>> {
    plain_response(
        StatusCode::BAD_REQUEST,
        "Bad Request (400)".to_string(),
        server_name,
    )
}

/// Build redirect response with an explicit status code
pub fn build_redirect_response_with_code(
    target: &str,
    code: StatusCode,
    server_name: &str,
) -> Response<Full<Bytes>> {
    Response::builder()
        .status(code)
        .header(SERVER, server_name)
        .header(LOCATION, target)
        .header(CONTENT_LENGTH, 0)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error(code.as_str(), &e);
            build_500_response(server_name)
        })
}

/// Build 500 Internal Server Error response
pub fn build_500_response(server_name: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header(SERVER, server_name)
        .header(CONTENT_TYPE, "text/plain")
        .body(Full::new(Bytes::from("Internal Server Error")))
        .unwrap_or_else(|_| {
            let mut resp = Response::new(Full::new(Bytes::from("Internal Server Error")));
            *resp.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            resp
        })
}

fn plain_response(status: StatusCode, body: String, server_name: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header(SERVER, server_name)
        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(CONTENT_LENGTH, body.len())
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            build_500_response(server_name)
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use hyper::Method;

    async fn body_string(resp: Response<Full<Bytes>>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn sample_route() -> Route {
        Route {
            method: Method::GET,
            path: "/ping/".to_string(),
            handler: Payload::new,
        }
    }

    #[tokio::test]
    async fn test_json_response_headers() {
        let payload = Payload::new().with("status", "ok");
        let resp = build_json_response(&payload, None, "test/1.0");
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(resp.headers()[SERVER], "test/1.0");
        assert_eq!(resp.headers()[CONTENT_LENGTH], "16");
        assert!(resp.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
        assert_eq!(body_string(resp).await, r#"{"status": "ok"}"#);
    }

    #[tokio::test]
    async fn test_json_response_cors() {
        let payload = Payload::new().with("status", "ok");
        let resp = build_json_response(&payload, Some("https://a.example"), "test/1.0");
        assert_eq!(resp.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "https://a.example");
        assert_eq!(resp.headers()[VARY], "Origin");
    }

    #[tokio::test]
    async fn test_404_plain_and_debug() {
        let routes = [sample_route()];

        let resp = build_404_response(false, "/nope/", routes.iter(), "test/1.0");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(resp).await, "Not Found");

        let resp = build_404_response(true, "/nope/", routes.iter(), "test/1.0");
        let body = body_string(resp).await;
        assert!(body.contains("Request path: /nope/"));
        assert!(body.contains("GET /ping/"));
    }

    #[tokio::test]
    async fn test_redirect_and_400() {
        let resp =
            build_redirect_response_with_code("/ping/", StatusCode::MOVED_PERMANENTLY, "t");
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(resp.headers()[LOCATION], "/ping/");

        let resp = build_400_response("t");
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_string(resp).await, "Bad Request (400)");
    }
}
