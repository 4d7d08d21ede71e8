use std::sync::Arc;

use backend_application::{AppState, Metrics};
use backend_domain::IsolationForest;
use backend_infrastructure::{AppConfig, CsvDatasetRepository};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub fn from_config(config: &AppConfig) -> Self {
        let runtime_config = config.to_runtime_config();
        let dataset_repo = Arc::new(CsvDatasetRepository::new(
            &runtime_config.reference_dataset_path,
        ));
        let detector = Arc::new(IsolationForest::new(runtime_config.model));

        let state = AppState {
            config: runtime_config,
            dataset_repo,
            detector,
            metrics: Arc::new(Metrics::default()),
        };

        Self { state }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn state_uses_configured_model_and_dataset() {
        let config = AppConfig {
            reference_dataset_path: "/definitely/missing/creditcard.csv".to_string(),
            model_estimators: 25,
            ..AppConfig::default()
        };
        let context = AppContext::from_config(&config);
        assert_eq!(context.state.config.model.estimators, 25);
        let err = context
            .state
            .dataset_repo
            .ping()
            .await
            .expect_err("missing dataset");
        assert!(format!("{:#}", err).contains("creditcard.csv"));
    }
}
