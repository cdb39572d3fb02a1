//! Binding parsed queries into the request context.
//!
//! # Responsibilities
//! - Parse a request's query string at most once and bind the result
//! - Give handlers the parsed [`Queries`] without re-parsing
//!
//! # Design Decisions
//! - Nothing is bound when the query string is empty or malformed; a bad
//!   query string never fails the request
//! - `queries_of` trusts that the binding exists and panics otherwise

use std::sync::Arc;

use axum::{extract::Request as AxumRequest, http::Request, middleware::Next, response::Response};

use crate::context::{Context, ContextKey, RequestContextExt};
use crate::query::queries::Queries;

/// Key under which parsed [`Queries`] are bound.
pub static QUERIES_KEY: ContextKey<Arc<Queries>> = ContextKey::new("Queries");

/// Bind the request's parsed queries into its context.
///
/// Returns `req` untouched when queries are already bound, when there are
/// none, or when the query string does not parse.
pub fn attach_queries<B>(req: Request<B>) -> Request<B> {
    let ctx = req.context();
    if ctx.value(&QUERIES_KEY).is_some() {
        return req;
    }

    let parsed = Queries::extract(req.uri().query().unwrap_or(""));
    let queries = match parsed {
        Ok(queries) if !queries.is_empty() => queries,
        Ok(_) => return req,
        Err(err) => {
            tracing::debug!(error = %err, uri = %req.uri(), "Malformed query string, not attaching");
            return req;
        }
    };

    tracing::debug!(count = queries.count(), "Queries attached");
    let ctx = ctx.with_value(&QUERIES_KEY, Arc::new(queries));
    req.with_context(ctx)
}

/// Returns the queries attached to a request, if any.
pub fn queries<B>(req: &Request<B>) -> Option<Arc<Queries>> {
    lookup_queries(&req.context())
}

/// Look up the queries bound into `ctx`, if any.
pub fn lookup_queries(ctx: &Context) -> Option<Arc<Queries>> {
    ctx.value(&QUERIES_KEY).cloned()
}

/// Returns the queries bound into `ctx`.
///
/// # Panics
///
/// Panics if no queries were bound. Use [`lookup_queries`] when the binding
/// may be missing.
pub fn queries_of(ctx: &Context) -> Arc<Queries> {
    match ctx.value(&QUERIES_KEY) {
        Some(queries) => queries.clone(),
        None => panic!("{} is not bound in this context", QUERIES_KEY),
    }
}

/// axum middleware applying [`attach_queries`] to every request.
pub async fn attach_queries_middleware(req: AxumRequest, next: Next) -> Response {
    next.run(attach_queries(req)).await
}
