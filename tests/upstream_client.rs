//! Upstream client behavior against a programmable mock upstream.

use std::sync::atomic::Ordering;
use std::time::Instant;

use axum::http::StatusCode;
use employee_facade::employees::{EmployeeCreateRequest, EmployeeSource};

mod common;

use common::MockUpstream;

fn create_request(name: &str) -> EmployeeCreateRequest {
    EmployeeCreateRequest {
        name: name.to_string(),
        salary: 75_000,
        age: 28,
        title: "Analyst".to_string(),
        email: "analyst@company.com".to_string(),
    }
}

#[tokio::test]
async fn test_list_returns_upstream_employees() {
    let mock = MockUpstream::with(common::sample_employees());
    let base_url = common::start_mock_upstream(mock.clone()).await;
    let client = common::upstream_client(&base_url);

    let employees = client.list_all().await;

    assert_eq!(employees.len(), 3);
    assert_eq!(employees[0].name, "John Doe");
    assert_eq!(employees[1].salary, 120_000);
    assert_eq!(mock.list_calls(), 1);
}

#[tokio::test]
async fn test_list_with_empty_body_is_empty() {
    let mock = MockUpstream::with(common::sample_employees());
    *mock.empty_list_body.lock().unwrap() = true;
    let base_url = common::start_mock_upstream(mock.clone()).await;
    let client = common::upstream_client(&base_url);

    assert!(client.list_all().await.is_empty());
    assert_eq!(mock.list_calls(), 1);
}

#[tokio::test]
async fn test_list_retries_until_success() {
    let mock = MockUpstream::with(common::sample_employees());
    mock.fail_next_lists.store(2, Ordering::SeqCst);
    let base_url = common::start_mock_upstream(mock.clone()).await;
    let client = common::upstream_client(&base_url);

    let start = Instant::now();
    let employees = client.list_all().await;

    assert_eq!(employees.len(), 3);
    assert_eq!(mock.list_calls(), 3);
    // 20ms before the second attempt, 40ms before the third.
    assert!(start.elapsed().as_millis() >= 60);
}

#[tokio::test]
async fn test_list_gives_up_after_three_attempts() {
    let mock = MockUpstream::with(common::sample_employees());
    mock.fail_next_lists.store(10, Ordering::SeqCst);
    let base_url = common::start_mock_upstream(mock.clone()).await;
    let client = common::upstream_client(&base_url);

    assert!(client.list_all().await.is_empty());
    assert_eq!(mock.list_calls(), 3);
}

#[tokio::test]
async fn test_get_by_id_found() {
    let mock = MockUpstream::with(common::sample_employees());
    let base_url = common::start_mock_upstream(mock.clone()).await;
    let client = common::upstream_client(&base_url);

    let employee = client.get_by_id("2").await.unwrap();
    assert_eq!(employee.name, "Jane Smith");
}

#[tokio::test]
async fn test_get_by_id_missing_is_none_and_not_retried() {
    let mock = MockUpstream::with(common::sample_employees());
    let base_url = common::start_mock_upstream(mock.clone()).await;
    let client = common::upstream_client(&base_url);

    assert!(client.get_by_id("does-not-exist").await.is_none());
    assert_eq!(mock.get_calls(), 1);
}

#[tokio::test]
async fn test_create_returns_upstream_record() {
    let mock = MockUpstream::with(Vec::new());
    let base_url = common::start_mock_upstream(mock.clone()).await;
    let client = common::upstream_client(&base_url);

    let created = client.create(&create_request("New Hire")).await.unwrap();

    assert_eq!(created.name, "New Hire");
    assert_eq!(created.salary, 75_000);
    assert!(!created.id.is_empty());
    assert_eq!(mock.employees.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_rejected_by_upstream() {
    let mock = MockUpstream::with(Vec::new());
    let base_url = common::start_mock_upstream(mock.clone()).await;
    let client = common::upstream_client(&base_url);

    let mut request = create_request("Nobody");
    request.title = String::new();

    assert!(client.create(&request).await.is_err());
    assert_eq!(mock.create_calls(), 1);
    assert!(mock.employees.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_sends_name_payload() {
    let mock = MockUpstream::with(common::sample_employees());
    let base_url = common::start_mock_upstream(mock.clone()).await;
    let client = common::upstream_client(&base_url);

    assert!(client.delete_by_name("Bob Johnson").await);

    assert_eq!(mock.deleted_names(), vec!["Bob Johnson".to_string()]);
    assert_eq!(mock.employees.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_delete_refused_is_false() {
    let mock = MockUpstream::with(common::sample_employees());
    *mock.delete_status.lock().unwrap() = Some(StatusCode::INTERNAL_SERVER_ERROR);
    let base_url = common::start_mock_upstream(mock.clone()).await;
    let client = common::upstream_client(&base_url);

    assert!(!client.delete_by_name("John Doe").await);
    assert_eq!(mock.deleted_names().len(), 1);
}
