//! Employee data model shared by the upstream client, the service and the
//! HTTP surface.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An employee as reported by the upstream API.
///
/// Records are read-only snapshots; changing one requires a round trip to the
/// upstream API. Field names on the wire are the upstream ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Opaque identifier assigned by the upstream API.
    pub id: String,

    #[serde(rename = "employee_name")]
    pub name: String,

    #[serde(rename = "employee_salary")]
    pub salary: u32,

    #[serde(rename = "employee_age", default)]
    pub age: u32,

    #[serde(rename = "employee_title", default)]
    pub title: String,

    #[serde(rename = "employee_email", default)]
    pub email: String,
}

/// Body of a create call. The id is assigned upstream.
///
/// Validation (non-empty name and title, positive salary and age) is left
/// to the upstream API, which rejects bad input with a non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeCreateRequest {
    pub name: String,
    pub salary: u32,
    pub age: u32,
    pub title: String,
    pub email: String,
}

/// The upstream API refused, or could not complete, a write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("upstream rejected the request: {reason}")]
pub struct Rejected {
    pub reason: String,
}

impl Rejected {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}
