use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::Json;
use tracing::warn;

use backend_application::commands::analyze_commands;
use backend_application::queries::sample_queries;
use backend_application::AppState;
use backend_domain::{AnalysisResult, TransactionTable};

use crate::error::HttpError;
use crate::middleware::{is_multipart, parse_csv_upload, parse_json_transactions, NO_DATA_MESSAGE};

const UPLOAD_FIELD: &str = "file";

/// Scores an uploaded CSV (`file` field) or a JSON `transactions` payload.
pub async fn analyze(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<AnalysisResult>, HttpError> {
    let table = read_transactions(&state, request).await.map_err(|err| {
        warn!("failed to read analyze payload: {}", err);
        state.metrics.record_rejected();
        err
    })?;
    let result = analyze_commands::analyze_transactions(&state, table).await?;
    Ok(Json(result))
}

pub async fn sample(State(state): State<AppState>) -> Result<Json<AnalysisResult>, HttpError> {
    let result = sample_queries::sample_analysis(&state).await?;
    Ok(Json(result))
}

async fn read_transactions(
    state: &AppState,
    request: Request,
) -> Result<TransactionTable, HttpError> {
    if is_multipart(request.headers()) {
        let multipart = Multipart::from_request(request, state)
            .await
            .map_err(|rejection| HttpError::from_rejection(rejection.status(), rejection.body_text()))?;
        return read_upload(multipart).await;
    }

    let headers = request.headers().clone();
    let body = Bytes::from_request(request, state)
        .await
        .map_err(|rejection| HttpError::from_rejection(rejection.status(), rejection.body_text()))?;
    parse_json_transactions(&headers, &body).map_err(|err| HttpError::BadRequest(err.to_string()))
}

async fn read_upload(mut multipart: Multipart) -> Result<TransactionTable, HttpError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| HttpError::from_rejection(err.status(), err.body_text()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let content = field
            .bytes()
            .await
            .map_err(|err| HttpError::from_rejection(err.status(), err.body_text()))?;
        return parse_csv_upload(&content).map_err(|err| HttpError::BadRequest(err.to_string()));
    }
    Err(HttpError::BadRequest(NO_DATA_MESSAGE.to_string()))
}
