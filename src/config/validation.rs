//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, attempts >= 1)
//! - Check that addresses and the upstream URL parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: FacadeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::config::schema::FacadeConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("upstream.base_url {url:?} is invalid: {reason}")]
    InvalidUpstreamUrl { url: String, reason: String },

    #[error("{field} {value:?} is not a valid socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("retries.multiplier must be at least 1")]
    ShrinkingBackoff,
}

/// Validate a parsed configuration, collecting every problem.
pub fn validate_config(config: &FacadeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(reason) = check_upstream_url(&config.upstream.base_url) {
        errors.push(ValidationError::InvalidUpstreamUrl {
            url: config.upstream.base_url.clone(),
            reason,
        });
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    let positive = [
        ("upstream.timeout_secs", config.upstream.timeout_secs),
        ("upstream.connect_timeout_secs", config.upstream.connect_timeout_secs),
        ("timeouts.request_secs", config.timeouts.request_secs),
        ("retries.max_attempts", u64::from(config.retries.max_attempts)),
        ("listener.max_body_bytes", config.listener.max_body_bytes as u64),
    ];
    for (field, value) in positive {
        if value == 0 {
            errors.push(ValidationError::Zero { field });
        }
    }

    if config.retries.multiplier == 0 {
        errors.push(ValidationError::ShrinkingBackoff);
    }

    if errors.is_empty() {
        warn_on_tight_request_timeout(config);
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_upstream_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme {:?}", url.scheme()));
    }
    if url.cannot_be_a_base() {
        return Err("URL cannot be used as a base".to_string());
    }
    Ok(())
}

/// Worst-case time a single list call can take: every attempt times out and
/// every backoff delay is served in full.
pub fn worst_case_list_duration(config: &FacadeConfig) -> Duration {
    let retries = &config.retries;
    let attempts = u64::from(retries.max_attempts.max(1));
    let mut total_ms = attempts.saturating_mul(config.upstream.timeout_secs.saturating_mul(1000));
    let mut delay = retries.initial_delay_ms;
    for _ in 1..attempts {
        total_ms = total_ms.saturating_add(delay.min(retries.max_delay_ms));
        delay = delay.saturating_mul(u64::from(retries.multiplier));
    }
    Duration::from_millis(total_ms)
}

fn warn_on_tight_request_timeout(config: &FacadeConfig) {
    let worst_case = worst_case_list_duration(config);
    let request_timeout = Duration::from_secs(config.timeouts.request_secs);
    if request_timeout < worst_case {
        tracing::warn!(
            request_timeout = ?request_timeout,
            worst_case_list = ?worst_case,
            "Request timeout is shorter than the worst-case upstream retry window"
        );
    }
}
