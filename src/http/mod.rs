//! HTTP server subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → transport.rs (bind server handle + local addr)
//!     → context::base (re-parent onto the shutdown context)
//!     → query::attach (bind parsed queries)
//!     → axum router match → routing::middleware (bind RouteContext)
//!     → handlers
//! ```

pub mod server;
pub mod transport;

pub use server::HttpServer;
pub use transport::{TransportContext, TransportContextLayer};
