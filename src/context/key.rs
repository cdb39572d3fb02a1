//! Opaque keys for the request value bag.
//!
//! # Design Decisions
//! - Keys are compared by address, never by name, so two keys with the same
//!   name never collide
//! - Keys must be declared as `static` items; a `const` is copied at every
//!   use site and has no stable address
//! - The value type is part of the key, so a lookup can only ask for the
//!   type the key was declared with

use std::fmt;
use std::marker::PhantomData;

/// A process-wide token under which one value type is stored in a [`Context`].
///
/// ```
/// use route_context::context::{Context, ContextKey};
///
/// static TENANT: ContextKey<String> = ContextKey::new("tenant");
///
/// let ctx = Context::background().with_value(&TENANT, "acme".to_string());
/// assert_eq!(ctx.value(&TENANT).map(String::as_str), Some("acme"));
/// ```
///
/// [`Context`]: crate::context::Context
pub struct ContextKey<T> {
    name: &'static str,
    _value: PhantomData<fn() -> T>,
}

impl<T> ContextKey<T> {
    /// Create a key. The name is only used for debugging output.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _value: PhantomData,
        }
    }

    /// Returns the key's debug name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    // Address of the static; this is the key's identity.
    pub(crate) fn id(&'static self) -> usize {
        self as *const Self as *const () as usize
    }
}

impl<T> fmt::Display for ContextKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "route-context value {}", self.name)
    }
}

impl<T> fmt::Debug for ContextKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextKey").field("name", &self.name).finish()
    }
}
