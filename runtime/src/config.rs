//! Configuration management for the runtime shim.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Shim configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Telemetry client configuration
    pub telemetry: TelemetrySettings,
    /// Settle delay before acknowledging PreFreeze, in milliseconds.
    ///
    /// PreFreeze holds its response for this long so in-flight work can
    /// drain before the runtime is checkpointed.
    pub pre_freeze_settle_ms: u64,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to (the platform sets `FC_SERVER_PORT`)
    pub port: u16,
}

/// Telemetry client settings used by the Initialize phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetrySettings {
    /// Application name reported with every transaction
    pub app_name: String,
    /// Backend credential
    pub license_key: String,
    /// Whether distributed tracing is enabled
    pub distributed_tracing: bool,
}

impl Config {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("FC_SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("FC_SERVER_PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(9000),
            },
            telemetry: TelemetrySettings {
                app_name: env::var("FC_APP_NAME").unwrap_or_else(|_| "fc-function".to_string()),
                license_key: env::var("FC_LICENSE_KEY")
                    .unwrap_or_else(|_| "dev-license-change-in-production".to_string()),
                distributed_tracing: env::var("FC_DISTRIBUTED_TRACING")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(true),
            },
            pre_freeze_settle_ms: env::var("FC_PRE_FREEZE_SETTLE_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2000),
        }
    }

    /// Address the HTTP entry point binds to.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Settle delay for the PreFreeze handler.
    #[must_use]
    pub const fn pre_freeze_settle(&self) -> Duration {
        Duration::from_millis(self.pre_freeze_settle_ms)
    }

    /// Telemetry configuration for `fc_telemetry::Client::connect`.
    #[must_use]
    pub fn telemetry_config(&self) -> fc_telemetry::TelemetryConfig {
        fc_telemetry::TelemetryConfig {
            app_name: self.telemetry.app_name.clone(),
            license_key: self.telemetry.license_key.clone(),
            distributed_tracing: self.telemetry.distributed_tracing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 9000,
            },
            telemetry: TelemetrySettings {
                app_name: "demo".to_string(),
                license_key: "key".to_string(),
                distributed_tracing: false,
            },
            pre_freeze_settle_ms: 2000,
        }
    }

    #[test]
    fn test_bind_addr_joins_host_and_port() {
        assert_eq!(config().bind_addr(), "127.0.0.1:9000");
    }

    #[test]
    fn test_settle_delay_is_milliseconds() {
        assert_eq!(config().pre_freeze_settle(), Duration::from_millis(2000));
    }

    #[test]
    fn test_telemetry_config_maps_all_fields() {
        let telemetry = config().telemetry_config();
        assert_eq!(telemetry.app_name, "demo");
        assert_eq!(telemetry.license_key, "key");
        assert!(!telemetry.distributed_tracing);
    }
}
