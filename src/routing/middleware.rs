//! Recording axum's route match into the request context.
//!
//! # Responsibilities
//! - Take the matched pattern and captured path variables decided by the
//!   axum router
//! - Fill a pooled [`RouteContext`] and bind it before the handler runs
//! - Return the routing state to the pool once the response is produced
//!
//! # Design Decisions
//! - Installed with `Router::route_layer`; the match result is only known
//!   after routing
//! - Matching itself stays with axum; this layer only records
//!
//! [`RouteContext`]: crate::routing::RouteContext

use std::sync::Arc;

use axum::{
    extract::{rejection::RawPathParamsRejection, MatchedPath, RawPathParams, Request, State},
    middleware::Next,
    response::Response,
};

use crate::context::RequestContextExt;
use crate::routing::pool::RouteContextPool;
use crate::routing::route_context::with_route_context;

pub async fn record_route(
    State(pool): State<Arc<RouteContextPool>>,
    params: Result<RawPathParams, RawPathParamsRejection>,
    req: Request,
    next: Next,
) -> Response {
    let rctx = pool.acquire();
    {
        let mut route = rctx.lock();
        match &params {
            Ok(params) => {
                for (key, value) in params.iter() {
                    route.url_params.add(key, value);
                }
            }
            Err(rejection) => {
                tracing::debug!(error = %rejection, "Path parameters unavailable");
            }
        }
        if let Some(matched) = req.extensions().get::<MatchedPath>() {
            route.push_pattern(matched.as_str());
        }
        tracing::debug!(
            pattern = %route.route_pattern,
            params = ?route.url_params,
            "Route context bound"
        );
    }

    let ctx = with_route_context(&req.context(), rctx.clone());
    let response = next.run(req.with_context(ctx)).await;

    pool.release(rctx);
    response
}
