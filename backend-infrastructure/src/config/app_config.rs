use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use backend_domain::{ModelSettings, RuntimeConfig};

use crate::config::validation::{validate_dataset_path, validate_model_settings};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub reference_dataset_path: String,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
    pub model_estimators: usize,
    pub model_max_samples: usize,
    pub model_contamination: f64,
    pub model_seed: u64,
    pub log_dir: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let model = ModelSettings::default();
        Self {
            bind_addr: "127.0.0.1:5000".to_string(),
            reference_dataset_path: "./data/creditcard.csv".to_string(),
            max_body_bytes: 16 * 1024 * 1024,
            request_timeout_seconds: 30,
            model_estimators: model.estimators,
            model_max_samples: model.max_samples,
            model_contamination: model.contamination,
            model_seed: model.seed,
            log_dir: None,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var("FRAUDSCOPE_CONFIG").unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        let base_dir = file_path.parent();
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            Self::from_toml(&content)?
        } else {
            warn!("{} not found, using defaults", path);
            AppConfig::default()
        };
        config.apply_env_overrides();
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|err| anyhow!("invalid config: {}", err))
    }

    pub fn normalize(&mut self) {
        self.reference_dataset_path = self.reference_dataset_path.trim().to_string();
        if let Some(log_dir) = &self.log_dir {
            if log_dir.trim().is_empty() {
                self.log_dir = None;
            }
        }
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.reference_dataset_path = resolve_path(base, &self.reference_dataset_path);
        if let Some(log_dir) = &self.log_dir {
            self.log_dir = Some(resolve_path(base, log_dir));
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }
        validate_dataset_path(&self.reference_dataset_path)?;
        validate_model_settings(&self.model_settings())
    }

    pub fn model_settings(&self) -> ModelSettings {
        ModelSettings {
            estimators: self.model_estimators,
            max_samples: self.model_max_samples,
            contamination: self.model_contamination,
            seed: self.model_seed,
        }
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            reference_dataset_path: self.reference_dataset_path.clone(),
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
            model: self.model_settings(),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("FRAUDSCOPE_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("FRAUDSCOPE_REFERENCE_DATASET_PATH") {
            self.reference_dataset_path = value;
        }
        if let Ok(value) = env::var("FRAUDSCOPE_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        if let Ok(value) = env::var("FRAUDSCOPE_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
        if let Ok(value) = env::var("FRAUDSCOPE_MODEL_ESTIMATORS") {
            self.model_estimators = value.parse().unwrap_or(self.model_estimators);
        }
        if let Ok(value) = env::var("FRAUDSCOPE_MODEL_MAX_SAMPLES") {
            self.model_max_samples = value.parse().unwrap_or(self.model_max_samples);
        }
        if let Ok(value) = env::var("FRAUDSCOPE_MODEL_CONTAMINATION") {
            self.model_contamination = value.parse().unwrap_or(self.model_contamination);
        }
        if let Ok(value) = env::var("FRAUDSCOPE_MODEL_SEED") {
            self.model_seed = value.parse().unwrap_or(self.model_seed);
        }
        if let Ok(value) = env::var("FRAUDSCOPE_LOG_DIR") {
            self.log_dir = Some(value);
        }
    }
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}
