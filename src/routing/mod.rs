//! Routing state subsystem.
//!
//! # Data Flow
//! ```text
//! Router match (axum)
//!     → middleware.rs (record params + pattern)
//!     → route_context.rs (RouteContext bound under ROUTE_CTX_KEY)
//!     → handlers: url_param / url_param_from_ctx
//!     → pool.rs (reset + reuse after the response)
//! ```
//!
//! # Design Decisions
//! - This subsystem never decides which route matches
//! - No rollback: a router that backtracks undoes its own writes

pub mod middleware;
pub mod params;
pub mod pool;
pub mod route_context;

pub use params::{Param, Params};
pub use pool::RouteContextPool;
pub use route_context::{
    route_context, route_context_of, url_param, url_param_from_ctx, with_route_context,
    RouteContext, SharedRouteContext, ROUTE_CTX_KEY,
};
