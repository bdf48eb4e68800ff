//! Employee aggregation subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP handler
//!     → service.rs (search / max salary / top earners / delete-by-id)
//!         → cache.rs (name search results, read-through)
//!         → source.rs (EmployeeSource port)
//!             → upstream client (list, get, create, delete-by-name)
//! ```
//!
//! # Design Decisions
//! - The service never fails; neutral values stand in for upstream errors
//! - The cache and the source are constructor dependencies, so tests can
//!   swap in fakes or a no-op cache
//! - The only shared mutable state is the search cache

pub mod cache;
pub mod service;
pub mod source;
pub mod types;

pub use cache::{DashMapSearchCache, NoopSearchCache, SearchCache};
pub use service::{EmployeeService, TOP_EARNERS_COUNT};
pub use source::EmployeeSource;
pub use types::{EmployeeCreateRequest, EmployeeRecord, Rejected};
