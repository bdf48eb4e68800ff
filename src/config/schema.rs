//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the facade.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Placeholder upstream endpoint used when nothing else is configured.
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "http://localhost:8112/api/v1/employee";

/// Root configuration for the employee facade.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FacadeConfig {
    /// Listener configuration (bind address, body limits).
    pub listener: ListenerConfig,

    /// Upstream employee API settings.
    pub upstream: UpstreamConfig,

    /// Retry policy applied to upstream list calls.
    pub retries: RetryConfig,

    /// Search result cache settings.
    pub cache: CacheConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8111").
    pub bind_address: String,

    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8111".to_string(),
            max_body_bytes: 64 * 1024,
        }
    }
}

/// Upstream employee API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the employee collection (list, create and delete target it directly).
    pub base_url: String,

    /// Total timeout for a single upstream call in seconds.
    pub timeout_secs: u64,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            timeout_secs: 10,
            connect_timeout_secs: 5,
        }
    }
}

/// Retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts, including the first one.
    pub max_attempts: u32,

    /// Delay before the first retry in milliseconds.
    pub initial_delay_ms: u64,

    /// Factor applied to the delay after each retry.
    pub multiplier: u32,

    /// Upper bound for a single delay in milliseconds.
    pub max_delay_ms: u64,

    /// Random jitter added on top of each delay, as a percentage of it.
    pub jitter_percent: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 2000,
            multiplier: 2,
            max_delay_ms: 30_000,
            jitter_percent: 0,
        }
    }
}

/// Search cache configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Enable the search cache. When disabled every search hits upstream.
    pub enabled: bool,

    /// Optional entry lifetime in seconds. Entries otherwise live until invalidated,
    /// including empty results cached while upstream was unreachable.
    pub ttl_secs: Option<u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: None,
        }
    }
}

/// Timeout configuration for facade requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 60 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9111".to_string(),
        }
    }
}
