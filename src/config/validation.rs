//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (pool size > 0, grace period > 0)
//! - Validate the bind address parses
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServerConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a socket address")]
    InvalidBindAddress(String),

    #[error("listener.server_name must not be empty")]
    EmptyServerName,

    #[error("routing.pool_max_idle must be greater than zero")]
    ZeroPoolSize,

    #[error("shutdown.grace_period_secs must be greater than zero")]
    ZeroGracePeriod,
}

/// Check a parsed configuration.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if config.listener.server_name.trim().is_empty() {
        errors.push(ValidationError::EmptyServerName);
    }
    if config.routing.pool_max_idle == 0 {
        errors.push(ValidationError::ZeroPoolSize);
    }
    if config.shutdown.grace_period_secs == 0 {
        errors.push(ValidationError::ZeroGracePeriod);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
