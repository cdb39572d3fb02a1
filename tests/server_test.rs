//! End-to-end tests through the demo router.

use axum::http::StatusCode;
use serde_json::json;

use route_context::config::ServerConfig;

mod common;

#[tokio::test]
async fn test_params_and_pattern_recorded() {
    let (server, _shutdown) = common::test_server();
    let (status, body) = common::get_json(common::app(&server), "/users/42/posts/7").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["params"], json!([["id", "42"], ["post", "7"]]));
    assert_eq!(body["pattern"], "/users/{id}/posts/{post}");
    assert_eq!(body["patterns"], json!(["/users/{id}/posts/{post}"]));
}

#[tokio::test]
async fn test_nested_router_pattern() {
    let (server, _shutdown) = common::test_server();
    let (_, body) = common::get_json(common::app(&server), "/api/items/widget").await;

    assert_eq!(body["params"], json!([["item", "widget"]]));
    assert_eq!(body["pattern"], "/api/items/{item}");
}

#[tokio::test]
async fn test_percent_decoded_param() {
    let (server, _shutdown) = common::test_server();
    let (_, body) = common::get_json(common::app(&server), "/users/j%20doe").await;
    assert_eq!(body["params"], json!([["id", "j doe"]]));
}

#[tokio::test]
async fn test_undecodable_param_still_records_pattern() {
    let (server, _shutdown) = common::test_server();
    let (status, body) = common::get_json(common::app(&server), "/users/%FF").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["params"], json!([]));
    assert_eq!(body["pattern"], "/users/{id}");
}

#[tokio::test]
async fn test_transport_values_survive_base_context() {
    let (server, _shutdown) = common::test_server();
    let (_, body) = common::get_json(common::app(&server), "/users/1").await;

    assert_eq!(body["server"], "route-context");
    assert_eq!(body["local_addr"], common::LOCAL_ADDR);
}

#[tokio::test]
async fn test_queries_attached() {
    let (server, _shutdown) = common::test_server();
    let (_, body) = common::get_json(common::app(&server), "/users/1?a=1,2&a=3&b=").await;

    assert_eq!(body["queries"]["a"], json!(["1", "2", "3"]));
    assert_eq!(body["queries"]["b"], json!([""]));
}

#[tokio::test]
async fn test_no_queries_attached_without_query_string() {
    let (server, _shutdown) = common::test_server();
    let (_, body) = common::get_json(common::app(&server), "/users/1").await;
    assert!(body["queries"].is_null());
}

#[tokio::test]
async fn test_malformed_query_does_not_fail_request() {
    let (server, _shutdown) = common::test_server();
    let (status, body) = common::get_json(common::app(&server), "/users/1?%zz").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["queries"].is_null());
    assert_eq!(body["params"], json!([["id", "1"]]));
}

#[tokio::test]
async fn test_query_attachment_disabled() {
    let mut config = ServerConfig::default();
    config.routing.attach_queries = false;
    let (server, _shutdown) = common::test_server_with(config);
    let (_, body) = common::get_json(common::app(&server), "/users/1?a=1").await;
    assert!(body["queries"].is_null());
}

#[tokio::test]
async fn test_search_defaults() {
    let (server, _shutdown) = common::test_server();

    let (_, body) = common::get_json(common::app(&server), "/search?tag=rust,tokio").await;
    assert_eq!(body["tags"], json!(["rust", "tokio"]));

    let (_, body) = common::get_json(common::app(&server), "/search?tag=&tag=").await;
    assert_eq!(body["tags"], json!(["all"]));

    let (_, body) = common::get_json(common::app(&server), "/search").await;
    assert_eq!(body["tags"], json!(["all"]));
}

#[tokio::test]
async fn test_route_contexts_are_pooled() {
    let (server, _shutdown) = common::test_server();
    let app = common::app(&server);

    common::get_json(app.clone(), "/users/1").await;
    assert_eq!(server.pool().idle_count(), 1);

    let (_, body) = common::get_json(app, "/api/items/x").await;
    assert_eq!(server.pool().idle_count(), 1);
    assert_eq!(body["params"], json!([["item", "x"]]));
    assert_eq!(body["patterns"], json!(["/api/items/{item}"]));
}

#[tokio::test]
async fn test_unrouted_path_gets_no_route_context() {
    let (server, _shutdown) = common::test_server();
    let (status, body) = common::get(common::app(&server), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
    assert_eq!(server.pool().idle_count(), 0);
}

#[tokio::test]
async fn test_shutdown_cancels_in_flight_requests() {
    let (server, shutdown) = common::test_server();
    let app = common::app(&server);

    let (_, body) = common::get(app.clone(), "/wait").await;
    assert_eq!(body, "done");

    shutdown.trigger();
    let (_, body) = common::get(app, "/wait").await;
    assert_eq!(body, "cancelled");
}
