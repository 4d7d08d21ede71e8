use anyhow::{anyhow, Result};

use backend_domain::ModelSettings;

pub fn validate_model_settings(settings: &ModelSettings) -> Result<()> {
    if settings.estimators == 0 {
        return Err(anyhow!("model_estimators must be greater than 0"));
    }
    if settings.max_samples < 2 {
        return Err(anyhow!("model_max_samples must be at least 2"));
    }
    if !(settings.contamination > 0.0 && settings.contamination <= 0.5) {
        return Err(anyhow!("model_contamination must be in (0, 0.5]"));
    }
    Ok(())
}

pub fn validate_dataset_path(value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(anyhow!("reference_dataset_path must not be empty"));
    }
    Ok(())
}
