//! Layered, cancellable request value bag.
//!
//! # Responsibilities
//! - Carry typed values keyed by [`ContextKey`] through a request's lifetime
//! - Carry the cancellation signal that governs the request
//!
//! # Design Decisions
//! - Binding never mutates: `with_value` returns a new layer pointing at the
//!   previous one, so derivations can happen concurrently
//! - Lookup walks layers newest-first; the newest binding for a key shadows
//!   older ones
//! - Cancellation is a `CancellationToken`; derived layers share their
//!   parent's token unless `with_cancel` creates a child

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::context::key::ContextKey;

struct Layer {
    key: usize,
    name: &'static str,
    value: Arc<dyn Any + Send + Sync>,
    parent: Option<Arc<Layer>>,
}

/// Per-request value bag coupled with a cancellation signal.
#[derive(Clone)]
pub struct Context {
    values: Option<Arc<Layer>>,
    cancel: CancellationToken,
}

impl Context {
    /// An empty context that is never cancelled.
    pub fn background() -> Self {
        Self {
            values: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Derive a context whose cancellation can be triggered through the
    /// returned token. Cancelling `self` still cancels the derived context.
    pub fn with_cancel(&self) -> (Self, CancellationToken) {
        let token = self.cancel.child_token();
        let ctx = Self {
            values: self.values.clone(),
            cancel: token.clone(),
        };
        (ctx, token)
    }

    /// Bind `value` under `key`, returning the derived context.
    pub fn with_value<T>(&self, key: &'static ContextKey<T>, value: T) -> Self
    where
        T: Send + Sync + 'static,
    {
        let layer = Layer {
            key: key.id(),
            name: key.name(),
            value: Arc::new(value),
            parent: self.values.clone(),
        };
        Self {
            values: Some(Arc::new(layer)),
            cancel: self.cancel.clone(),
        }
    }

    /// Look up the newest value bound under `key`.
    ///
    /// Returns `None` when the key was never bound or the stored value has a
    /// different type.
    pub fn value<T>(&self, key: &'static ContextKey<T>) -> Option<&T>
    where
        T: 'static,
    {
        let id = key.id();
        let mut layer = self.values.as_deref();
        while let Some(current) = layer {
            if current.key == id {
                return current.value.downcast_ref::<T>();
            }
            layer = current.parent.as_deref();
        }
        None
    }

    /// Returns true once this context has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Resolves when this context is cancelled.
    pub async fn cancelled(&self) {
        self.cancel.cancelled().await
    }

    fn bound_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        let mut layer = self.values.as_deref();
        while let Some(current) = layer {
            names.push(current.name);
            layer = current.parent.as_deref();
        }
        names
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::background()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("values", &self.bound_names())
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
