//! Reqwest-backed client for the upstream employee API.
//!
//! # Responsibilities
//! - Build URLs from the configured base (collection URL, `{base}/{id}`)
//! - Decode upstream envelopes
//! - Retry the list call with exponential backoff
//! - Fold every failure into the neutral result of the operation
//!
//! # Design Decisions
//! - Only the list call is retried; get, create and delete run once
//! - Every call is bounded by the client's request and connect timeouts
//! - Failures are logged here, since callers cannot tell them apart from
//!   "no data"

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use crate::config::UpstreamConfig;
use crate::employees::{EmployeeCreateRequest, EmployeeRecord, EmployeeSource, Rejected};
use crate::observability::metrics;
use crate::resilience::{retry_with_backoff, RetryPolicy};
use crate::upstream::envelope::{
    decode_envelope, DeleteByNameBody, UpstreamListEnvelope, UpstreamSingleEnvelope,
};
use crate::upstream::error::UpstreamError;

/// Client for the upstream employee collection.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: Client,
    base_url: Url,
    retry_policy: RetryPolicy,
}

impl UpstreamClient {
    /// Build a client for the configured base URL, with bounded timeouts.
    pub fn new(config: &UpstreamConfig, retry_policy: RetryPolicy) -> Result<Self, UpstreamError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| UpstreamError::InvalidUrl(format!("{}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::InvalidUrl(config.base_url.clone()));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(UpstreamError::Build)?;

        Ok(Self {
            http,
            base_url,
            retry_policy,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// `{base}/{id}`, with `id` percent-encoded as a single path segment.
    fn employee_url(&self, id: &str) -> Result<Url, UpstreamError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| UpstreamError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    async fn fetch_all(&self) -> Result<Vec<EmployeeRecord>, UpstreamError> {
        let response = self.http.get(self.base_url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        let body = response.bytes().await?;
        let envelope: Option<UpstreamListEnvelope> = decode_envelope(&body)?;
        Ok(envelope.and_then(|e| e.data).unwrap_or_default())
    }

    async fn fetch_one(&self, id: &str) -> Result<Option<EmployeeRecord>, UpstreamError> {
        let response = self.http.get(self.employee_url(id)?).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        let body = response.bytes().await?;
        let envelope: Option<UpstreamSingleEnvelope> = decode_envelope(&body)?;
        Ok(envelope.and_then(|e| e.data))
    }

    async fn post_employee(
        &self,
        request: &EmployeeCreateRequest,
    ) -> Result<Option<EmployeeRecord>, UpstreamError> {
        let response = self
            .http
            .post(self.base_url.clone())
            .json(request)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        let body = response.bytes().await?;
        let envelope: Option<UpstreamSingleEnvelope> = decode_envelope(&body)?;
        Ok(envelope.and_then(|e| e.data))
    }

    async fn send_delete(&self, name: &str) -> Result<StatusCode, UpstreamError> {
        let body = DeleteByNameBody {
            name: name.to_string(),
        };
        let response = self
            .http
            .delete(self.base_url.clone())
            .json(&body)
            .send()
            .await?;
        Ok(response.status())
    }
}

#[async_trait]
impl EmployeeSource for UpstreamClient {
    async fn list_all(&self) -> Vec<EmployeeRecord> {
        let result = retry_with_backoff(
            &self.retry_policy,
            "list",
            UpstreamError::is_retryable,
            || self.fetch_all(),
        )
        .await;

        match result {
            Ok(employees) => {
                metrics::record_upstream_call("list", "success");
                tracing::debug!(count = employees.len(), "Fetched employees from upstream");
                employees
            }
            Err(e) => {
                metrics::record_upstream_call("list", "error");
                tracing::error!(error = %e, "Error fetching all employees");
                Vec::new()
            }
        }
    }

    async fn get_by_id(&self, id: &str) -> Option<EmployeeRecord> {
        match self.fetch_one(id).await {
            Ok(Some(employee)) => {
                metrics::record_upstream_call("get", "success");
                Some(employee)
            }
            Ok(None) => {
                metrics::record_upstream_call("get", "not_found");
                tracing::debug!(id, "Employee not found upstream");
                None
            }
            Err(e) => {
                metrics::record_upstream_call("get", "error");
                tracing::error!(id, error = %e, "Error fetching employee by id");
                None
            }
        }
    }

    async fn create(&self, request: &EmployeeCreateRequest) -> Result<EmployeeRecord, Rejected> {
        match self.post_employee(request).await {
            Ok(Some(employee)) => {
                metrics::record_upstream_call("create", "success");
                Ok(employee)
            }
            Ok(None) => {
                metrics::record_upstream_call("create", "rejected");
                tracing::warn!(name = %request.name, "Upstream accepted create but returned no employee");
                Err(Rejected::new("empty response body"))
            }
            Err(e) => {
                let outcome = if matches!(e, UpstreamError::Status(_)) { "rejected" } else { "error" };
                metrics::record_upstream_call("create", outcome);
                tracing::error!(name = %request.name, error = %e, "Error creating employee");
                Err(Rejected::new(e.to_string()))
            }
        }
    }

    async fn delete_by_name(&self, name: &str) -> bool {
        match self.send_delete(name).await {
            Ok(status) if status.is_success() => {
                metrics::record_upstream_call("delete", "success");
                true
            }
            Ok(status) => {
                metrics::record_upstream_call("delete", "rejected");
                tracing::warn!(name, status = %status, "Upstream refused delete");
                false
            }
            Err(e) => {
                metrics::record_upstream_call("delete", "error");
                tracing::error!(name, error = %e, "Error deleting employee");
                false
            }
        }
    }
}
