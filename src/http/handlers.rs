//! Employee endpoint handlers.
//!
//! Each handler is a thin mapping from one service operation to a status
//! code: only a missing employee (404) and a rejected or malformed create
//! (400) produce non-200 responses.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::employees::{EmployeeCreateRequest, EmployeeRecord};
use crate::http::server::AppState;

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
}

pub async fn health() -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
    })
}

pub async fn get_all_employees(State(state): State<AppState>) -> Json<Vec<EmployeeRecord>> {
    Json(state.service.get_all_employees().await)
}

pub async fn search_by_name(
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> Json<Vec<EmployeeRecord>> {
    Json(state.service.search_by_name(&query).await)
}

pub async fn get_employee_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match state.service.get_by_id(&id).await {
        Some(employee) => (StatusCode::OK, Json(employee)).into_response(),
        None => (StatusCode::NOT_FOUND, "Employee not found").into_response(),
    }
}

pub async fn highest_salary(State(state): State<AppState>) -> Json<u32> {
    Json(state.service.highest_salary().await)
}

pub async fn top_ten_earner_names(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.service.top_ten_earner_names().await)
}

/// Bodies that do not decode as an [`EmployeeCreateRequest`] are rejected with
/// 400, the same status an upstream rejection maps to.
pub async fn create_employee(
    State(state): State<AppState>,
    body: Result<Json<EmployeeCreateRequest>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "Create body rejected");
            return (StatusCode::BAD_REQUEST, "Invalid employee").into_response();
        }
    };

    match state.service.create_employee(&request).await {
        Ok(employee) => (StatusCode::OK, Json(employee)).into_response(),
        Err(rejected) => {
            tracing::debug!(reason = %rejected.reason, "Create rejected");
            (StatusCode::BAD_REQUEST, "Employee rejected by upstream").into_response()
        }
    }
}

pub async fn delete_employee_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    if state.service.delete_by_id(&id).await {
        (StatusCode::OK, id).into_response()
    } else {
        (StatusCode::NOT_FOUND, "Employee not found").into_response()
    }
}
