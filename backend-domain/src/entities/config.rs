// Runtime configuration entity
// Immutable settings shared by every request

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub reference_dataset_path: String,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
    pub model: ModelSettings,
}

/// Isolation Forest parameters. Every request fits a fresh forest with these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelSettings {
    pub estimators: usize,
    pub max_samples: usize,
    pub contamination: f64,
    pub seed: u64,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            estimators: 100,
            max_samples: 256,
            contamination: 0.1,
            seed: 42,
        }
    }
}
