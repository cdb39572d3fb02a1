//! Request-scoped routing metadata for axum/tower middleware chains.
//!
//! A router records matched URL parameters and pattern history into a
//! [`RouteContext`] bound to the request's [`Context`]; handlers read them
//! back with [`url_param`]. Query strings are parsed once, comma-expanded,
//! and bound as [`Queries`].

pub mod config;
pub mod context;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod query;
pub mod routing;

pub use config::ServerConfig;
pub use context::{with_base_context, Context, ContextKey, RequestContextExt};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use query::{attach_queries, queries, Queries, QueryError};
pub use routing::{url_param, url_param_from_ctx, Params, RouteContext};
