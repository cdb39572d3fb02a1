//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (route binding, query attachment, shutdown)
//!     → logging.rs (subscriber with EnvFilter + fmt layer)
//! ```

pub mod logging;

pub use logging::init_logging;
