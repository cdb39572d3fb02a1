//! Pool of reusable routing states.
//!
//! # Responsibilities
//! - Hand out a clean [`SharedRouteContext`] per request
//! - Reset and keep released states so their buffers are reused
//!
//! # Design Decisions
//! - A released state still referenced elsewhere is dropped, not reused;
//!   a handler holding on to it must never observe a reset
//! - Idle list is capped; extra states are freed

use std::sync::Arc;

use parking_lot::Mutex;

use crate::routing::route_context::{RouteContext, SharedRouteContext};

/// Arena-with-reset pool of routing states.
#[derive(Debug)]
pub struct RouteContextPool {
    idle: Mutex<Vec<SharedRouteContext>>,
    max_idle: usize,
}

impl RouteContextPool {
    /// Create a pool keeping at most `max_idle` released states.
    pub fn new(max_idle: usize) -> Self {
        Self {
            idle: Mutex::new(Vec::with_capacity(max_idle)),
            max_idle,
        }
    }

    /// Take an idle state or create a new one.
    pub fn acquire(&self) -> SharedRouteContext {
        self.idle.lock().pop().unwrap_or_else(RouteContext::shared)
    }

    /// Return a state to the pool.
    pub fn release(&self, rctx: SharedRouteContext) {
        if Arc::strong_count(&rctx) != 1 {
            tracing::debug!("Route context still referenced, not pooling");
            return;
        }
        rctx.lock().reset();

        let mut idle = self.idle.lock();
        if idle.len() < self.max_idle {
            idle.push(rctx);
        }
    }

    /// Number of idle states currently held.
    pub fn idle_count(&self) -> usize {
        self.idle.lock().len()
    }
}

impl Default for RouteContextPool {
    fn default() -> Self {
        Self::new(1024)
    }
}
