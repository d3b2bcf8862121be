//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files;
//! every section has defaults so partial configs (or none at all, with
//! environment overrides) are accepted.

use serde::{Deserialize, Serialize};

/// Root configuration for the forwarding shim.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ShimConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream the shim forwards every request to.
    pub upstream: UpstreamConfig,

    /// Timeout configuration for the outbound call.
    pub timeouts: TimeoutConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream target configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Destination host, optionally with port (e.g., "tags.example.net").
    /// No scheme, no trailing slash.
    pub domain: String,

    /// Literal leading path segment stripped from the inbound path before
    /// forwarding (e.g., "/xyz"). Empty string disables stripping.
    pub path_prefix: String,

    /// Outbound scheme, "https" or "http".
    pub scheme: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            domain: String::new(),
            path_prefix: String::new(),
            scheme: "https".to_string(),
        }
    }
}

/// Timeout configuration for outbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
        }
    }
}
