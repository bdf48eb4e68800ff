//! Aggregation over the upstream employee API.
//!
//! Upstream only lists, fetches by id, creates and deletes by name. Searching,
//! salary aggregation, top earners and delete-by-id are composed here.

use std::sync::Arc;

use crate::employees::cache::SearchCache;
use crate::employees::source::EmployeeSource;
use crate::employees::types::{EmployeeCreateRequest, EmployeeRecord, Rejected};

/// Number of names returned by [`EmployeeService::top_ten_earner_names`].
pub const TOP_EARNERS_COUNT: usize = 10;

/// Derived employee operations. Never fails: upstream problems surface as
/// empty lists, zero, `None`, `false` or `Rejected`.
#[derive(Clone)]
pub struct EmployeeService {
    source: Arc<dyn EmployeeSource>,
    search_cache: Arc<dyn SearchCache>,
}

impl EmployeeService {
    pub fn new(source: Arc<dyn EmployeeSource>, search_cache: Arc<dyn SearchCache>) -> Self {
        Self {
            source,
            search_cache,
        }
    }

    pub async fn get_all_employees(&self) -> Vec<EmployeeRecord> {
        self.source.list_all().await
    }

    /// Employees whose name contains `query` (case-sensitive), in upstream
    /// order. Results are cached per query until the next successful create.
    ///
    /// An upstream outage looks like an empty list, and that empty result is
    /// cached like any other. Set `cache.ttl_secs` to bound how long it stays.
    pub async fn search_by_name(&self, query: &str) -> Vec<EmployeeRecord> {
        if let Some(cached) = self.search_cache.get(query) {
            tracing::debug!(query, matches = cached.len(), "Search served from cache");
            return cached;
        }

        let epoch = self.search_cache.epoch();
        let matches = filter_by_name(self.get_all_employees().await, query);
        self.search_cache.insert(query, matches.clone(), epoch);
        matches
    }

    pub async fn get_by_id(&self, id: &str) -> Option<EmployeeRecord> {
        self.source.get_by_id(id).await
    }

    /// Highest salary across all employees; 0 when there are none.
    pub async fn highest_salary(&self) -> u32 {
        max_salary(&self.get_all_employees().await)
    }

    /// Names of the ten best-paid employees, highest first. Ties keep
    /// upstream order. Fewer employees yield a shorter list.
    pub async fn top_ten_earner_names(&self) -> Vec<String> {
        top_earner_names(self.get_all_employees().await, TOP_EARNERS_COUNT)
    }

    /// Create an employee, clearing the search cache on success.
    pub async fn create_employee(
        &self,
        request: &EmployeeCreateRequest,
    ) -> Result<EmployeeRecord, Rejected> {
        let created = self.source.create(request).await?;
        self.search_cache.invalidate_all();
        tracing::info!(id = %created.id, name = %created.name, "Employee created");
        Ok(created)
    }

    /// Delete by id. Upstream deletes by name, so the record is looked up
    /// first and its name is used for the delete call.
    ///
    /// Upstream deletes every employee sharing that name; there is no way to
    /// target a single one of several namesakes.
    pub async fn delete_by_id(&self, id: &str) -> bool {
        let Some(employee) = self.source.get_by_id(id).await else {
            tracing::info!(id, "Delete skipped: employee not found");
            return false;
        };

        let deleted = self.source.delete_by_name(&employee.name).await;
        if deleted {
            tracing::info!(id, name = %employee.name, "Employee deleted");
        } else {
            tracing::warn!(id, name = %employee.name, "Upstream did not delete employee");
        }
        deleted
    }
}

fn filter_by_name(employees: Vec<EmployeeRecord>, query: &str) -> Vec<EmployeeRecord> {
    employees
        .into_iter()
        .filter(|employee| employee.name.contains(query))
        .collect()
}

fn max_salary(employees: &[EmployeeRecord]) -> u32 {
    employees.iter().map(|e| e.salary).max().unwrap_or(0)
}

fn top_earner_names(mut employees: Vec<EmployeeRecord>, count: usize) -> Vec<String> {
    // sort_by is stable, so equal salaries keep upstream order
    employees.sort_by(|a, b| b.salary.cmp(&a.salary));
    employees.into_iter().take(count).map(|e| e.name).collect()
}
