//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Configure log level from config, overridable via `RUST_LOG`

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Filter directives used when `RUST_LOG` is not set.
pub fn default_directives(config: &ObservabilityConfig) -> String {
    format!(
        "employee_facade={level},tower_http={level}",
        level = config.log_level
    )
}

/// Install the global tracing subscriber. Call once, at startup.
pub fn init_logging(config: &ObservabilityConfig) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directives(config).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
