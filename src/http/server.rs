//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the demo handlers
//! - Wire up middleware (tracing, transport identity, base context,
//!   query attachment, route recording)
//! - Bind server to listener
//! - Drain in-flight requests on shutdown within the grace period

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Request,
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::context::{
    BaseContextLayer, Context, RequestContextExt, ServerHandle, LOCAL_ADDR_CONTEXT_KEY,
    SERVER_CONTEXT_KEY,
};
use crate::http::transport::TransportContextLayer;
use crate::lifecycle::Shutdown;
use crate::query::{attach_queries_middleware, queries};
use crate::routing::{middleware::record_route, route_context_of, RouteContextPool};

/// HTTP server exposing the request-context demo routes.
pub struct HttpServer {
    config: ServerConfig,
    shutdown: Shutdown,
    pool: Arc<RouteContextPool>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig, shutdown: Shutdown) -> Self {
        let pool = Arc::new(RouteContextPool::new(config.routing.pool_max_idle));
        Self {
            config,
            shutdown,
            pool,
        }
    }

    /// Build the Axum router for a listener bound to `local_addr`.
    pub fn router(&self, local_addr: SocketAddr) -> Router {
        let server = ServerHandle::new(self.config.listener.server_name.as_str(), local_addr);

        let mut app = Router::new()
            .route("/users/{id}", get(show_route))
            .route("/users/{id}/posts/{post}", get(show_route))
            .nest(
                "/api",
                Router::new().route("/items/{item}", get(show_route)),
            )
            .route("/search", get(search))
            .route("/wait", get(wait_for_cancel))
            .route_layer(from_fn_with_state(self.pool.clone(), record_route))
            .route("/health", get(|| async { "ok" }));

        if self.config.routing.attach_queries {
            app = app.layer(from_fn(attach_queries_middleware));
        }

        app.layer(BaseContextLayer::new(self.shutdown.context()))
            .layer(TransportContextLayer::new(server, local_addr))
            .layer(TraceLayer::new_for_http())
    }

    /// The route context pool shared by all requests.
    pub fn pool(&self) -> &Arc<RouteContextPool> {
        &self.pool
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let on_shutdown = self.shutdown.clone();
        let serving = axum::serve(listener, self.router(addr))
            .with_graceful_shutdown(async move { on_shutdown.wait().await })
            .into_future();
        tokio::pin!(serving);

        tokio::select! {
            result = &mut serving => return result,
            _ = self.shutdown.wait() => {}
        }

        let grace = Duration::from_secs(self.config.shutdown.grace_period_secs);
        match tokio::time::timeout(grace, serving).await {
            Ok(result) => result?,
            Err(_) => tracing::warn!(
                grace_period_secs = self.config.shutdown.grace_period_secs,
                "Grace period elapsed, dropping in-flight requests"
            ),
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Echo the routing state and queries bound for this request.
async fn show_route(req: Request) -> Json<Value> {
    let ctx = req.context();
    let rctx = route_context_of(&ctx);
    let route = rctx.lock();
    let params: Vec<(&str, &str)> = route.url_params.iter().collect();
    let queries = queries(&req)
        .map(|q| json!(q.get_all()))
        .unwrap_or(Value::Null);

    Json(json!({
        "params": params,
        "pattern": route.route_pattern,
        "patterns": route.route_patterns,
        "queries": queries,
        "server": ctx.value(&SERVER_CONTEXT_KEY).map(|s| s.name.to_string()),
        "local_addr": ctx.value(&LOCAL_ADDR_CONTEXT_KEY).map(|a| a.to_string()),
    }))
}

/// Look up `tag` with a fallback for absent or blank values.
async fn search(req: Request) -> Json<Value> {
    let fallback = vec!["all".to_string()];
    let tags = match queries(&req) {
        Some(queries) => queries.get("tag", &fallback).to_vec(),
        None => fallback,
    };
    Json(json!({ "tags": tags }))
}

/// Wait until the request context is cancelled or a second passes.
async fn wait_for_cancel(req: Request) -> &'static str {
    let ctx: Context = req.context();
    tokio::select! {
        _ = ctx.cancelled() => "cancelled",
        _ = tokio::time::sleep(Duration::from_secs(1)) => "done",
    }
}
