use tracing::{error, warn};

use crate::commands::analyze_commands::score_batch;
use crate::{AppError, AppState};
use backend_domain::{sample_reference, AnalysisResult};

pub async fn sample_analysis(state: &AppState) -> Result<AnalysisResult, AppError> {
    state.metrics.record_sample();
    let reference = state.dataset_repo.load_reference().await.map_err(|err| {
        error!("failed to load reference dataset: {:#}", err);
        state.metrics.record_rejected();
        AppError::BadRequest(format!("{:#}", err))
    })?;

    let sample = {
        let mut rng = rand::thread_rng();
        sample_reference(&reference, &mut rng)
    }
    .map_err(|err| {
        warn!("reference sampling failed: {}", err);
        state.metrics.record_rejected();
        AppError::from(err)
    })?;

    score_batch(state, sample).await
}
