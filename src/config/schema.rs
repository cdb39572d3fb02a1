//! Configuration schema definitions.
//!
//! This module defines the configuration structure for the demo server.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address, server identity).
    pub listener: ListenerConfig,

    /// Routing state and query attachment settings.
    pub routing: RoutingConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Graceful shutdown settings.
    pub shutdown: ShutdownConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Name bound into every request context as the server handle.
    pub server_name: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            server_name: "route-context".to_string(),
        }
    }
}

/// Routing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Maximum idle route contexts kept for reuse.
    pub pool_max_idle: usize,

    /// Parse and attach query strings on every request.
    pub attach_queries: bool,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            pool_max_idle: 1024,
            attach_queries: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter directive, used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "route_context=info,tower_http=info".to_string(),
        }
    }
}

/// Shutdown configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ShutdownConfig {
    /// Seconds in-flight requests get to finish after the base context is
    /// cancelled.
    pub grace_period_secs: u64,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            grace_period_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: ServerConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:8080");
        assert_eq!(config.routing.pool_max_idle, 1024);
        assert!(config.routing.attach_queries);
        assert_eq!(config.shutdown.grace_period_secs, 30);
    }

    #[test]
    fn test_partial_section() {
        let config: ServerConfig = toml::from_str(
            r#"
            [routing]
            attach_queries = false
            "#,
        )
        .unwrap();
        assert!(!config.routing.attach_queries);
        assert_eq!(config.routing.pool_max_idle, 1024);
    }
}
