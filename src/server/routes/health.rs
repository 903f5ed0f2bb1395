//! Health check endpoints

use crate::server::state::AppState;
use actix_web::{HttpResponse, web};
use serde::Serialize;
use std::borrow::Cow;
use tracing::debug;

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/health")
            .route("", web::get().to(health_check))
            .route("/detailed", web::get().to(detailed_health_check)),
    );
}

/// Basic liveness status
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: Cow<'static, str>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: Cow<'static, str>,
}

impl HealthStatus {
    fn new(status: &'static str) -> Self {
        Self {
            status: Cow::Borrowed(status),
            timestamp: chrono::Utc::now(),
            version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Store and worker pool diagnostics
#[derive(Debug, Serialize)]
pub struct DetailedHealthStatus {
    #[serde(flatten)]
    pub health: HealthStatus,
    pub storage_backend: String,
    pub storage_healthy: bool,
    pub batch_workers: usize,
    pub batch_in_flight: usize,
    pub accepting_batches: bool,
}

/// Basic health check endpoint
pub async fn health_check() -> HttpResponse {
    debug!("Health check requested");
    HttpResponse::Ok().json(HealthStatus::new("healthy"))
}

/// Health check including the item store and batch worker pool
async fn detailed_health_check(state: web::Data<AppState>) -> HttpResponse {
    debug!("Detailed health check requested");

    let storage_healthy = state.storage.health_check().await;
    let pool = state.processor.pool();
    let accepting_batches = !pool.is_closed();
    let healthy = storage_healthy && accepting_batches;

    let body = DetailedHealthStatus {
        health: HealthStatus::new(if healthy { "healthy" } else { "degraded" }),
        storage_backend: state.storage.backend().to_string(),
        storage_healthy,
        batch_workers: pool.size(),
        batch_in_flight: pool.in_flight(),
        accepting_batches,
    };

    if healthy {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
