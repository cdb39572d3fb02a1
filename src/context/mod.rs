//! Request-scoped value bag and context keys.
//!
//! # Data Flow
//! ```text
//! Transport binds ServerHandle / local addr
//!     → base.rs (re-parent onto the base context)
//!     → routing / query layers bind RouteContext, Queries
//!     → handlers look values up by ContextKey
//! ```
//!
//! # Design Decisions
//! - One typed `static` key per value; identity is the key's address
//! - Contexts are immutable; every binding creates a new layer

pub mod base;
pub mod key;
pub mod request;
pub mod value;

pub use base::{
    with_base_context, BaseContext, BaseContextLayer, ServerHandle, LOCAL_ADDR_CONTEXT_KEY,
    SERVER_CONTEXT_KEY,
};
pub use key::ContextKey;
pub use request::RequestContextExt;
pub use value::Context;
