//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all employee handlers
//! - Wire up middleware (tracing, timeout, body limit, request ID, metrics)
//! - Bind server to listener
//! - Stop accepting on the shutdown signal and drain in-flight requests

use axum::{
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    map_response_body::MapResponseBodyLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::FacadeConfig;
use crate::employees::{cache, EmployeeService};
use crate::http::handlers;
use crate::http::request::{propagate_request_id_layer, record_metrics, set_request_id_layer};
use crate::resilience::RetryPolicy;
use crate::upstream::{UpstreamClient, UpstreamError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: EmployeeService,
}

/// HTTP server for the employee facade.
pub struct HttpServer {
    router: Router,
    config: FacadeConfig,
}

impl HttpServer {
    /// Create a server around an already wired service.
    pub fn new(config: FacadeConfig, service: EmployeeService) -> Self {
        let state = AppState { service };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Wire the upstream client, search cache and service from configuration.
    pub fn from_config(config: FacadeConfig) -> Result<Self, UpstreamError> {
        let client = UpstreamClient::new(&config.upstream, RetryPolicy::from(&config.retries))?;
        let search_cache = cache::from_config(&config.cache);

        tracing::info!(
            upstream = %client.base_url(),
            max_attempts = client.retry_policy().max_attempts,
            cache_enabled = config.cache.enabled,
            "Employee service wired"
        );

        let service = EmployeeService::new(Arc::new(client), search_cache);
        Ok(Self::new(config, service))
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &FacadeConfig, state: AppState) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route(
                "/employees",
                get(handlers::get_all_employees).post(handlers::create_employee),
            )
            .route("/employees/search/{query}", get(handlers::search_by_name))
            .route("/employees/highest-salary", get(handlers::highest_salary))
            .route("/employees/top-ten-earners", get(handlers::top_ten_earner_names))
            .route(
                "/employees/{id}",
                get(handlers::get_employee_by_id).delete(handlers::delete_employee_by_id),
            )
            .route_layer(middleware::from_fn(record_metrics))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(TraceLayer::new_for_http())
                    .layer(propagate_request_id_layer())
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
                    .layer(MapResponseBodyLayer::new(axum::body::Body::new))
                    .layer(RequestBodyLimitLayer::new(config.listener.max_body_bytes)),
            )
    }

    /// Run the server, accepting connections on the given listener until a
    /// shutdown signal arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
