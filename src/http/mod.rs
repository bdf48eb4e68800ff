//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, metrics)
//!     → handlers.rs (one handler per facade operation)
//!     → employees::EmployeeService
//!     → JSON / plain-text response
//! ```
//!
//! # Routes
//! - `GET    /employees`                  all employees
//! - `GET    /employees/search/{query}`   name search
//! - `GET    /employees/{id}`             one employee or 404
//! - `GET    /employees/highest-salary`   integer
//! - `GET    /employees/top-ten-earners`  list of names
//! - `POST   /employees`                  created employee or 400
//! - `DELETE /employees/{id}`             deleted id or 404
//! - `GET    /health`                     liveness

pub mod handlers;
pub mod request;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
