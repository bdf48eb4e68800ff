//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use employee_facade::config::{FacadeConfig, UpstreamConfig};
use employee_facade::employees::{EmployeeCreateRequest, EmployeeRecord};
use employee_facade::http::HttpServer;
use employee_facade::lifecycle::Shutdown;
use employee_facade::resilience::RetryPolicy;
use employee_facade::upstream::{
    DeleteByNameBody, UpstreamClient, UpstreamListEnvelope, UpstreamSingleEnvelope,
};
use tokio::net::TcpListener;

pub const EMPLOYEE_PATH: &str = "/api/v1/employee";

/// Programmable in-memory upstream employee API.
#[derive(Default)]
pub struct MockUpstream {
    pub employees: Mutex<Vec<EmployeeRecord>>,
    /// Answer the next N list calls with 503.
    pub fail_next_lists: AtomicU32,
    /// Answer list calls with an empty 200 body.
    pub empty_list_body: Mutex<bool>,
    /// Status returned by DELETE; 200 when unset.
    pub delete_status: Mutex<Option<StatusCode>>,
    pub list_calls: AtomicU32,
    pub get_calls: AtomicU32,
    pub create_calls: AtomicU32,
    pub deleted_names: Mutex<Vec<String>>,
}

impl MockUpstream {
    pub fn with(employees: Vec<EmployeeRecord>) -> Arc<Self> {
        Arc::new(Self {
            employees: Mutex::new(employees),
            ..Default::default()
        })
    }

    pub fn list_calls(&self) -> u32 {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn get_calls(&self) -> u32 {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> u32 {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn deleted_names(&self) -> Vec<String> {
        self.deleted_names.lock().unwrap().clone()
    }
}

async fn list(State(mock): State<Arc<MockUpstream>>) -> Response {
    mock.list_calls.fetch_add(1, Ordering::SeqCst);

    let remaining = mock.fail_next_lists.load(Ordering::SeqCst);
    if remaining > 0 {
        mock.fail_next_lists.store(remaining - 1, Ordering::SeqCst);
        return (StatusCode::SERVICE_UNAVAILABLE, "Service Unavailable").into_response();
    }
    if *mock.empty_list_body.lock().unwrap() {
        return StatusCode::OK.into_response();
    }

    let data = mock.employees.lock().unwrap().clone();
    Json(UpstreamListEnvelope {
        data: Some(data),
        status: Some("Successfully processed request.".into()),
    })
    .into_response()
}

async fn get_one(State(mock): State<Arc<MockUpstream>>, Path(id): Path<String>) -> Response {
    mock.get_calls.fetch_add(1, Ordering::SeqCst);

    let found = mock
        .employees
        .lock()
        .unwrap()
        .iter()
        .find(|e| e.id == id)
        .cloned();
    match found {
        Some(employee) => Json(UpstreamSingleEnvelope {
            data: Some(employee),
            status: Some("Successfully processed request.".into()),
        })
        .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn create(
    State(mock): State<Arc<MockUpstream>>,
    Json(request): Json<EmployeeCreateRequest>,
) -> Response {
    mock.create_calls.fetch_add(1, Ordering::SeqCst);

    if request.name.is_empty() || request.title.is_empty() || request.salary == 0 || request.age == 0 {
        return (StatusCode::BAD_REQUEST, "Invalid employee").into_response();
    }

    let mut employees = mock.employees.lock().unwrap();
    let created = EmployeeRecord {
        id: format!("new-{}", employees.len() + 1),
        name: request.name,
        salary: request.salary,
        age: request.age,
        title: request.title,
        email: request.email,
    };
    employees.push(created.clone());
    Json(UpstreamSingleEnvelope {
        data: Some(created),
        status: Some("Successfully processed request.".into()),
    })
    .into_response()
}

async fn delete_by_name(
    State(mock): State<Arc<MockUpstream>>,
    Json(body): Json<DeleteByNameBody>,
) -> Response {
    mock.deleted_names.lock().unwrap().push(body.name.clone());

    if let Some(status) = *mock.delete_status.lock().unwrap() {
        return status.into_response();
    }
    mock.employees.lock().unwrap().retain(|e| e.name != body.name);
    Json(serde_json::json!({ "data": true, "status": "Successfully processed request." }))
        .into_response()
}

/// Start the mock upstream on an ephemeral port and return its base URL.
pub async fn start_mock_upstream(mock: Arc<MockUpstream>) -> String {
    let app = Router::new()
        .route(EMPLOYEE_PATH, get(list).post(create).delete(delete_by_name))
        .route(&format!("{EMPLOYEE_PATH}/{{id}}"), get(get_one))
        .with_state(mock);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    format!("http://{addr}{EMPLOYEE_PATH}")
}

/// Fast retry policy for tests: 3 attempts, 20ms then 40ms.
pub fn fast_retries() -> RetryPolicy {
    RetryPolicy::new(3, Duration::from_millis(20), 2)
}

pub fn upstream_client(base_url: &str) -> UpstreamClient {
    let config = UpstreamConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
        connect_timeout_secs: 2,
    };
    UpstreamClient::new(&config, fast_retries()).unwrap()
}

/// Start the facade against `upstream_url` and return its base URL.
pub async fn start_facade(upstream_url: &str, shutdown: &Shutdown) -> SocketAddr {
    let mut config = FacadeConfig::default();
    config.upstream.base_url = upstream_url.to_string();
    config.retries.initial_delay_ms = 20;

    let server = HttpServer::from_config(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    addr
}

pub fn employee(id: &str, name: &str, salary: u32) -> EmployeeRecord {
    EmployeeRecord {
        id: id.to_string(),
        name: name.to_string(),
        salary,
        age: 30,
        title: "Engineer".to_string(),
        email: format!("{}@company.com", id),
    }
}

pub fn sample_employees() -> Vec<EmployeeRecord> {
    vec![
        employee("1", "John Doe", 100_000),
        employee("2", "Jane Smith", 120_000),
        employee("3", "Bob Johnson", 90_000),
    ]
}
