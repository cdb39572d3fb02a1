//! Query string subsystem.
//!
//! # Data Flow
//! ```text
//! Request URI query string
//!     → queries.rs (strict parse, comma expansion)
//!     → attach.rs (bind under QUERIES_KEY if non-empty and well-formed)
//!     → handlers: queries(&req).get(key, defaults)
//! ```

pub mod attach;
pub mod error;
pub mod queries;

pub use attach::{
    attach_queries, attach_queries_middleware, lookup_queries, queries, queries_of, QUERIES_KEY,
};
pub use error::QueryError;
pub use queries::Queries;
