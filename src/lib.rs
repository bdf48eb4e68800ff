//! Employee facade library.
//!
//! A simplified employee REST API backed entirely by an upstream employee
//! API: searching, salary aggregation, top earners and delete-by-id are
//! composed here from the upstream list, get, create and delete-by-name calls.

pub mod config;
pub mod employees;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod upstream;

pub use config::schema::FacadeConfig;
pub use employees::EmployeeService;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use upstream::UpstreamClient;
