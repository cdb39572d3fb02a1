//! Shutdown coordination.

use tokio_util::sync::CancellationToken;

use crate::context::Context;

/// Coordinator for graceful shutdown.
///
/// Owns the long-lived base context that requests are re-parented onto;
/// triggering shutdown cancels it for every request at once.
#[derive(Debug, Clone)]
pub struct Shutdown {
    ctx: Context,
    token: CancellationToken,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (ctx, token) = Context::background().with_cancel();
        Self { ctx, token }
    }

    /// The base context cancelled by [`Shutdown::trigger`].
    pub fn context(&self) -> Context {
        self.ctx.clone()
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self) {
        tracing::info!("Shutdown triggered");
        self.token.cancel();
    }

    pub fn is_triggered(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once shutdown has been triggered.
    pub async fn wait(&self) {
        self.token.cancelled().await
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
