//! Re-parenting requests onto a long-lived base context.
//!
//! # Responsibilities
//! - Replace each request's context with a derivative of a base context
//! - Carry forward the server handle and local address from the original
//!   context, when present
//!
//! # Design Decisions
//! - Installed as the outermost layer, before routing; anything bound to the
//!   original context other than the two transport values is dropped
//! - Cancellation of the base context, not the original, governs the
//!   request from here on (graceful shutdown)

use std::net::SocketAddr;
use std::sync::Arc;
use std::task::{Context as TaskContext, Poll};

use axum::http::Request;
use tower::{Layer, Service};

use crate::context::key::ContextKey;
use crate::context::request::RequestContextExt;
use crate::context::value::Context;

/// Identity of the server handling a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerHandle {
    pub name: Arc<str>,
    pub bind_address: SocketAddr,
}

impl ServerHandle {
    pub fn new(name: impl Into<Arc<str>>, bind_address: SocketAddr) -> Self {
        Self {
            name: name.into(),
            bind_address,
        }
    }
}

/// Key under which the transport binds the active [`ServerHandle`].
pub static SERVER_CONTEXT_KEY: ContextKey<ServerHandle> = ContextKey::new("http-server");

/// Key under which the transport binds the local address a request arrived on.
pub static LOCAL_ADDR_CONTEXT_KEY: ContextKey<SocketAddr> = ContextKey::new("local-addr");

/// Layer applying [`BaseContext`] to a service.
#[derive(Debug, Clone)]
pub struct BaseContextLayer {
    base: Context,
}

impl BaseContextLayer {
    pub fn new(base: Context) -> Self {
        Self { base }
    }
}

impl<S> Layer<S> for BaseContextLayer {
    type Service = BaseContext<S>;

    fn layer(&self, inner: S) -> Self::Service {
        BaseContext {
            inner,
            base: self.base.clone(),
        }
    }
}

/// Service that dispatches every request with its context replaced by a
/// derivative of `base`.
#[derive(Debug, Clone)]
pub struct BaseContext<S> {
    inner: S,
    base: Context,
}

/// Wrap `handler` so it runs under `base` instead of the request's own context.
pub fn with_base_context<S>(handler: S, base: Context) -> BaseContext<S> {
    BaseContextLayer::new(base).layer(handler)
}

impl<S> BaseContext<S> {
    fn overlay(&self, original: &Context) -> Context {
        let mut ctx = self.base.clone();
        if let Some(server) = original.value(&SERVER_CONTEXT_KEY) {
            ctx = ctx.with_value(&SERVER_CONTEXT_KEY, server.clone());
        }
        if let Some(addr) = original.value(&LOCAL_ADDR_CONTEXT_KEY) {
            ctx = ctx.with_value(&LOCAL_ADDR_CONTEXT_KEY, *addr);
        }
        ctx
    }
}

impl<S, B> Service<Request<B>> for BaseContext<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut TaskContext<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<B>) -> Self::Future {
        let ctx = self.overlay(&req.context());
        self.inner.call(req.with_context(ctx))
    }
}
