//! Upstream employee API subsystem.
//!
//! # Data Flow
//! ```text
//! EmployeeSource call (list / get / create / delete-by-name)
//!     → client.rs (build request against base URL, bounded timeouts)
//!     → resilience::retry_with_backoff (list only)
//!     → envelope.rs (decode `{data, status}`; empty body = absent)
//!     → error.rs (UpstreamError, folded into a neutral result at the boundary)
//! ```
//!
//! # Upstream contract
//! - `GET    {base}`       → `{ "data": [employee, ...] }`
//! - `GET    {base}/{id}`  → `{ "data": employee, "status": "..." }` or empty body
//! - `POST   {base}`       → same single envelope on 2xx
//! - `DELETE {base}`       body `{ "name": ... }` → 2xx on success

pub mod client;
pub mod envelope;
pub mod error;

pub use client::UpstreamClient;
pub use envelope::{DeleteByNameBody, UpstreamListEnvelope, UpstreamSingleEnvelope};
pub use error::UpstreamError;
