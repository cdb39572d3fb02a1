//! Transport identity for inbound requests.
//!
//! # Responsibilities
//! - Bind the server handle and the local listener address into every
//!   request's context, the way a per-connection context would carry them

use std::net::SocketAddr;
use std::task::{Context as TaskContext, Poll};

use axum::http::Request;
use tower::{Layer, Service};

use crate::context::{RequestContextExt, ServerHandle, LOCAL_ADDR_CONTEXT_KEY, SERVER_CONTEXT_KEY};

/// Layer applying [`TransportContext`] to a service.
#[derive(Debug, Clone)]
pub struct TransportContextLayer {
    server: ServerHandle,
    local_addr: SocketAddr,
}

impl TransportContextLayer {
    pub fn new(server: ServerHandle, local_addr: SocketAddr) -> Self {
        Self { server, local_addr }
    }
}

impl<S> Layer<S> for TransportContextLayer {
    type Service = TransportContext<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TransportContext {
            inner,
            server: self.server.clone(),
            local_addr: self.local_addr,
        }
    }
}

/// Service binding transport identity into the request context.
#[derive(Debug, Clone)]
pub struct TransportContext<S> {
    inner: S,
    server: ServerHandle,
    local_addr: SocketAddr,
}

impl<S, B> Service<Request<B>> for TransportContext<S>
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
        let ctx = req
            .context()
            .with_value(&SERVER_CONTEXT_KEY, self.server.clone())
            .with_value(&LOCAL_ADDR_CONTEXT_KEY, self.local_addr);
        self.inner.call(req.with_context(ctx))
    }
}
