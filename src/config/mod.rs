//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → FacadeConfig (validated, immutable)
//!     → handed to startup, which builds the upstream client, cache and server
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    CacheConfig, FacadeConfig, ListenerConfig, ObservabilityConfig, RetryConfig, TimeoutConfig,
    UpstreamConfig, DEFAULT_UPSTREAM_BASE_URL,
};
pub use validation::{validate_config, ValidationError};
