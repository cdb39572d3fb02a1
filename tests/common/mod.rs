//! Shared utilities for integration tests.

use std::net::SocketAddr;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use route_context::{HttpServer, ServerConfig, Shutdown};

pub const LOCAL_ADDR: &str = "127.0.0.1:18080";

/// Build a server with default config plus its shutdown coordinator.
pub fn test_server() -> (HttpServer, Shutdown) {
    test_server_with(ServerConfig::default())
}

pub fn test_server_with(config: ServerConfig) -> (HttpServer, Shutdown) {
    let shutdown = Shutdown::new();
    (HttpServer::new(config, shutdown.clone()), shutdown)
}

pub fn app(server: &HttpServer) -> Router {
    let addr: SocketAddr = LOCAL_ADDR.parse().unwrap();
    server.router(addr)
}

/// Send a GET through the router and return status and raw body.
pub async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Send a GET through the router and decode the JSON body.
#[allow(dead_code)]
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(app, uri).await;
    (status, serde_json::from_str(&body).unwrap())
}
