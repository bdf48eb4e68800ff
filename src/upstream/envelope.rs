//! Upstream wire envelopes.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::employees::EmployeeRecord;
use crate::upstream::error::UpstreamError;

/// `GET {base}` response: `{ "data": [ ... ] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpstreamListEnvelope {
    pub data: Option<Vec<EmployeeRecord>>,
    pub status: Option<String>,
}

/// `GET {base}/{id}` and `POST {base}` response: `{ "data": {...}, "status": "..." }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpstreamSingleEnvelope {
    pub data: Option<EmployeeRecord>,
    pub status: Option<String>,
}

/// `DELETE {base}` request body. Upstream keys deletion by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteByNameBody {
    pub name: String,
}

/// Decode an envelope, treating an empty (or whitespace-only) body as absent.
pub fn decode_envelope<T: DeserializeOwned>(body: &[u8]) -> Result<Option<T>, UpstreamError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    Ok(Some(serde_json::from_slice(body)?))
}
