//! Attaching a [`Context`] to an `http::Request`.
//!
//! The context is stored in the request extensions. A request that never had
//! one attached reports an empty background context.

use axum::http::Request;

use crate::context::value::Context;

/// Access to the request-scoped [`Context`].
pub trait RequestContextExt {
    /// Returns the request's context, or a background context if none was set.
    fn context(&self) -> Context;

    /// Returns true if a context was explicitly attached to this request.
    fn has_context(&self) -> bool;

    /// Replace the request's context.
    fn with_context(self, ctx: Context) -> Self;
}

impl<B> RequestContextExt for Request<B> {
    fn context(&self) -> Context {
        self.extensions()
            .get::<Context>()
            .cloned()
            .unwrap_or_default()
    }

    fn has_context(&self) -> bool {
        self.extensions().get::<Context>().is_some()
    }

    fn with_context(mut self, ctx: Context) -> Self {
        self.extensions_mut().insert(ctx);
        self
    }
}
