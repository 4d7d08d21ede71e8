use axum::routing::{get, post};
use axum::Router;

use backend_application::AppState;

use crate::handlers::{analyze_handlers, ops_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ops_handlers::root))
        .route("/analyze", post(analyze_handlers::analyze))
        .route("/sample", get(analyze_handlers::sample))
        .route("/health", get(ops_handlers::health))
        .route("/health/ready", get(ops_handlers::health_ready))
        .route("/metrics/prometheus", get(ops_handlers::metrics_prometheus))
        // paths served to the dashboard frontend
        .route("/api/analyze", post(analyze_handlers::analyze))
        .route("/api/sample-data", get(analyze_handlers::sample))
        .route("/api/health", get(ops_handlers::health))
        .fallback(ops_handlers::not_found)
        .with_state(state)
}
