//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Upstream list call:
//!     → reqwest client timeout (every call has a deadline)
//!     → On failure: retries.rs (check if retryable, retry with backoff)
//!     → backoff.rs (delay = initial * multiplier^(attempt-1), capped)
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - Retries only for idempotent requests (the list call)
//! - The policy is a plain value so it can be tested without a network

pub mod backoff;
pub mod retries;

pub use retries::{retry_with_backoff, RetryPolicy};
