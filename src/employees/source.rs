//! The port the service reads employees through.

use async_trait::async_trait;

use crate::employees::types::{EmployeeCreateRequest, EmployeeRecord, Rejected};

/// Upstream employee operations with failures already folded into neutral
/// results. Implementations never return transport errors to the caller.
#[async_trait]
pub trait EmployeeSource: Send + Sync {
    /// Every employee, in upstream order. Empty on failure.
    async fn list_all(&self) -> Vec<EmployeeRecord>;

    /// A single employee. `None` when upstream has no such record or fails.
    async fn get_by_id(&self, id: &str) -> Option<EmployeeRecord>;

    /// Create an employee. `Err(Rejected)` on a non-2xx response, an empty
    /// body, or a transport failure.
    async fn create(&self, request: &EmployeeCreateRequest) -> Result<EmployeeRecord, Rejected>;

    /// Delete every employee upstream keys under `name`. True on a 2xx response.
    async fn delete_by_name(&self, name: &str) -> bool;
}
