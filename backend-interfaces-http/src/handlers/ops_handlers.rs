use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};
use tokio::time::{timeout, Duration};
use tracing::error;

use backend_application::AppState;

use crate::error::HttpError;

#[derive(serde::Serialize)]
pub struct HealthStatus {
    status: &'static str,
}

pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Fraud Detection API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "POST /analyze": "Analyze transactions for fraud (CSV upload or JSON data)",
            "GET /sample": "Analyze a random sample of the labelled reference dataset",
            "GET /health": "Health check endpoint",
            "GET /health/ready": "Readiness check against the reference dataset",
            "GET /metrics/prometheus": "Request and scoring counters"
        }
    }))
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus { status: "healthy" })
}

pub async fn health_ready(State(state): State<AppState>) -> StatusCode {
    let timeout_secs = state.config.request_timeout_seconds.max(1);
    let timeout_duration = Duration::from_secs(timeout_secs);
    match timeout(timeout_duration, state.dataset_repo.ping()).await {
        Ok(Ok(_)) => StatusCode::OK,
        Ok(Err(err)) => {
            error!("ready check failed: {:#}", err);
            StatusCode::SERVICE_UNAVAILABLE
        }
        Err(_) => {
            error!("ready check timeout after {}s", timeout_secs);
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

pub async fn metrics_prometheus(State(state): State<AppState>) -> impl IntoResponse {
    let payload = state.metrics.render_prometheus();
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; version=0.0.4; charset=utf-8"),
    );
    (headers, payload)
}

pub async fn not_found() -> HttpError {
    HttpError::NotFound
}
