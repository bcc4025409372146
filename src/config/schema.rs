//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the client.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default response body ceiling: 200 MiB.
pub const DEFAULT_MAX_RESPONSE_BYTES: u64 = 200 * 1024 * 1024;

/// Root configuration for the HTTP toolkit.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct HttpKitConfig {
    /// Transport pool tuning.
    pub pool: PoolConfig,

    /// Per-request defaults applied by the structured request path.
    pub defaults: RequestDefaults,

    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Connection pool configuration shared by every transport.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Maximum idle connections kept per host.
    pub max_idle_per_host: usize,

    /// Idle connection timeout in seconds.
    pub idle_timeout_secs: u64,

    /// Connect timeout (TCP dial + TLS handshake) in seconds.
    pub connect_timeout_secs: u64,

    /// TCP keepalive interval in seconds.
    pub tcp_keepalive_secs: u64,

    /// Offer HTTP/2 through ALPN alongside HTTP/1.1.
    pub http2: bool,

    /// Maximum redirect hops followed when redirects are allowed.
    pub max_redirects: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_idle_per_host: 100,
            idle_timeout_secs: 90,
            connect_timeout_secs: 30,
            tcp_keepalive_secs: 30,
            http2: true,
            max_redirects: 10,
        }
    }
}

impl PoolConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn tcp_keepalive(&self) -> Duration {
        Duration::from_secs(self.tcp_keepalive_secs)
    }
}

/// Defaults used when a structured request leaves a field unset.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RequestDefaults {
    /// Overall request timeout in seconds.
    pub timeout_secs: u64,

    /// Response body ceiling in bytes.
    pub max_response_bytes: u64,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    pub level: String,

    /// Emit JSON lines instead of the human-readable format.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "httpkit=info".to_string(),
            json: false,
        }
    }
}
