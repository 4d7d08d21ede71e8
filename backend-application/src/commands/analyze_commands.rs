use anyhow::anyhow;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{AppError, AppState};
use backend_domain::{AnalysisResult, Scorer, TransactionTable};

/// Rows beyond this are dropped before scoring.
pub const MAX_BATCH_ROWS: usize = 500;

pub async fn analyze_transactions(
    state: &AppState,
    mut table: TransactionTable,
) -> Result<AnalysisResult, AppError> {
    state.metrics.record_analyze();
    let received = table.len();
    if received > MAX_BATCH_ROWS {
        warn!(
            "truncating batch of {} rows to the first {}",
            received, MAX_BATCH_ROWS
        );
        table.truncate(MAX_BATCH_ROWS);
    }
    score_batch(state, table).await
}

/// Fitting the forest is CPU bound, so it runs on the blocking pool.
pub(crate) async fn score_batch(
    state: &AppState,
    table: TransactionTable,
) -> Result<AnalysisResult, AppError> {
    let worker_state = state.clone();
    tokio::task::spawn_blocking(move || score_table(&worker_state, &table))
        .await
        .map_err(|err| AppError::Internal(anyhow!("scoring task failed: {}", err)))?
}

fn score_table(state: &AppState, table: &TransactionTable) -> Result<AnalysisResult, AppError> {
    let analysis_id = Uuid::new_v4();
    let result = Scorer::new(&*state.detector).score(table).map_err(|err| {
        warn!(%analysis_id, "batch rejected: {}", err);
        state.metrics.record_rejected();
        AppError::from(err)
    })?;

    let statistics = &result.statistics;
    state
        .metrics
        .record_scored(statistics.total_transactions, statistics.suspicious_count);
    info!(
        %analysis_id,
        rows = statistics.total_transactions,
        suspicious = statistics.suspicious_count,
        fraud_rate = statistics.fraud_rate,
        "batch scored"
    );
    Ok(result)
}
