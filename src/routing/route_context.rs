//! Per-request routing state and its context bindings.
//!
//! # Responsibilities
//! - Hold matched URL parameters, the routing path override, and the
//!   pattern history across nested routers
//! - Bind the state into a request [`Context`] and read it back
//!
//! # Design Decisions
//! - The state is bound as a shared handle so the router can keep writing
//!   to it after binding; one request owns it, so the lock is uncontended
//! - `reset` truncates instead of reallocating so pooled contexts keep
//!   their buffers
//! - `route_context_of` trusts that the binding exists and panics otherwise;
//!   `route_context` is the non-panicking lookup

use std::sync::Arc;

use axum::http::Request;
use parking_lot::Mutex;

use crate::context::{Context, ContextKey, RequestContextExt};
use crate::routing::params::Params;

/// Routing state handle stored in a request context.
pub type SharedRouteContext = Arc<Mutex<RouteContext>>;

/// Key under which the [`SharedRouteContext`] is bound.
pub static ROUTE_CTX_KEY: ContextKey<SharedRouteContext> = ContextKey::new("RouteContext");

/// Routing state tracked for one request.
#[derive(Debug, Clone, Default)]
pub struct RouteContext {
    /// URL routing parameter keys and values.
    pub url_params: Params,

    /// Routing path override used by sub-routers.
    pub route_path: String,

    /// Cumulative pattern matching the path.
    pub route_pattern: String,

    /// Patterns matched at each router level, in traversal order.
    pub route_patterns: Vec<String>,
}

impl RouteContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a fresh context in a shareable handle.
    pub fn shared() -> SharedRouteContext {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Return to the initial state, keeping allocated buffers.
    pub fn reset(&mut self) {
        self.url_params.clear();
        self.route_path.clear();
        self.route_pattern.clear();
        self.route_patterns.clear();
    }

    /// Returns the URL parameter `key`, or `""`.
    pub fn url_param(&self, key: &str) -> &str {
        self.url_params.get(key)
    }

    /// Record the pattern matched at the next router level and recompute the
    /// cumulative pattern.
    pub fn push_pattern(&mut self, pattern: impl Into<String>) {
        self.route_patterns.push(pattern.into());
        self.route_pattern = join_patterns(&self.route_patterns);
    }
}

fn join_patterns(patterns: &[String]) -> String {
    let mut joined = patterns.concat();
    while joined.contains("/*/") {
        joined = joined.replace("/*/", "/");
    }
    if joined != "/" {
        if let Some(stripped) = joined.strip_suffix("//") {
            joined.truncate(stripped.len());
        }
        if let Some(stripped) = joined.strip_suffix('/') {
            joined.truncate(stripped.len());
        }
    }
    joined
}

/// Bind `rctx` into `ctx`.
pub fn with_route_context(ctx: &Context, rctx: SharedRouteContext) -> Context {
    ctx.with_value(&ROUTE_CTX_KEY, rctx)
}

/// Look up the routing state, if one was bound.
pub fn route_context(ctx: &Context) -> Option<SharedRouteContext> {
    ctx.value(&ROUTE_CTX_KEY).cloned()
}

/// Returns the routing state bound into `ctx`.
///
/// # Panics
///
/// Panics if no routing state was bound. Use [`route_context`] when the
/// binding may be missing.
pub fn route_context_of(ctx: &Context) -> SharedRouteContext {
    match ctx.value(&ROUTE_CTX_KEY) {
        Some(rctx) => rctx.clone(),
        None => panic!("{} is not bound in this context", ROUTE_CTX_KEY),
    }
}

/// Returns the URL parameter `key` of a request, or `""` when the request
/// carries no routing state.
pub fn url_param<B>(req: &Request<B>, key: &str) -> String {
    url_param_from_ctx(&req.context(), key)
}

/// Returns the URL parameter `key` from a context, or `""`.
pub fn url_param_from_ctx(ctx: &Context, key: &str) -> String {
    match ctx.value(&ROUTE_CTX_KEY) {
        Some(rctx) => rctx.lock().url_param(key).to_string(),
        None => String::new(),
    }
}
