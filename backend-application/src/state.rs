use std::sync::Arc;

use backend_domain::ports::{AnomalyDetector, ReferenceDatasetRepository};
use backend_domain::RuntimeConfig;

use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub dataset_repo: Arc<dyn ReferenceDatasetRepository>,
    pub detector: Arc<dyn AnomalyDetector>,
    pub metrics: Arc<Metrics>,
}
