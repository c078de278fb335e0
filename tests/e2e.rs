//! Boots the server on an ephemeral port and talks to it over TCP.

use http_body_util::{BodyExt, Empty};
use hyper::body::Bytes;
use hyper::{Method, Request, StatusCode};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use rust_pingserver::config::{AppState, Config};
use rust_pingserver::error::ServerError;
use rust_pingserver::{handler, server};

struct TestServer {
    addr: SocketAddr,
    stop: oneshot::Sender<()>,
    task: JoinHandle<Result<(), ServerError>>,
}

impl TestServer {
    fn start(config: Config) -> Self {
        let listener =
            server::create_reusable_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let state = Arc::new(AppState::new(config, handler::default_routes().unwrap()));

        let (stop, stopped) = oneshot::channel::<()>();
        let task = tokio::spawn(server::start_server_loop(listener, state, async move {
            let _ = stopped.await;
        }));
        Self { addr, stop, task }
    }

    async fn send(&self, method: Method, path: &str) -> (StatusCode, String, Vec<u8>) {
        let stream = TcpStream::connect(self.addr).await.unwrap();
        let (mut sender, conn) = hyper::client::conn::http1::handshake(TokioIo::new(stream))
            .await
            .unwrap();
        tokio::spawn(async move {
            let _ = conn.await;
        });

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Host", format!("localhost:{}", self.addr.port()))
            .body(Empty::<Bytes>::new())
            .unwrap();
        let resp = sender.send_request(req).await.unwrap();

        let status = resp.status();
        let content_type = resp
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = resp.into_body().collect().await.unwrap().to_bytes().to_vec();
        (status, content_type, body)
    }

    async fn stop(self) {
        self.stop.send(()).unwrap();
        self.task.await.unwrap().unwrap();
    }
}

fn quiet_config() -> Config {
    let mut config = Config::default();
    config.logging.access_log = false;
    config.performance.shutdown_grace = 1;
    config
}

#[tokio::test]
async fn test_ping_and_health_end_to_end() {
    let server = TestServer::start(quiet_config());

    let (status, content_type, body) = server.send(Method::GET, "/ping/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "application/json");
    assert_eq!(body, br#"{"message": "pong"}"#);

    let (status, content_type, body) = server.send(Method::GET, "/health/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "application/json");
    let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(parsed, serde_json::json!({"status": "ok"}));

    server.stop().await;
}

#[tokio::test]
async fn test_unknown_routes_end_to_end() {
    let server = TestServer::start(quiet_config());

    let (status, _, _) = server.send(Method::POST, "/ping/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = server.send(Method::GET, "/unknown/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    server.stop().await;
}

#[tokio::test]
async fn test_repeated_requests_are_identical() {
    let server = TestServer::start(quiet_config());

    let (_, _, first) = server.send(Method::GET, "/health/").await;
    for _ in 0..10 {
        let (status, _, body) = server.send(Method::GET, "/health/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, first);
    }

    server.stop().await;
}

#[tokio::test]
async fn test_keep_alive_disabled_closes_connection() {
    let mut config = quiet_config();
    config.performance.keep_alive = false;
    let server = TestServer::start(config);

    let mut stream = TcpStream::connect(server.addr).await.unwrap();
    stream
        .write_all(b"GET /ping/ HTTP/1.1\r\nHost: localhost\r\n\r\n")
        .await
        .unwrap();

    // EOF arrives only if the server closes after the first response
    let mut raw = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut raw))
        .await
        .expect("server kept the connection open")
        .unwrap();

    let text = String::from_utf8(raw).unwrap();
    assert!(text.starts_with("HTTP/1.1 200 OK"), "{text}");
    assert!(text.ends_with(r#"{"message": "pong"}"#), "{text}");

    server.stop().await;
}
