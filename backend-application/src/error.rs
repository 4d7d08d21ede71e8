use thiserror::Error;

use backend_domain::ScoringError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<ScoringError> for AppError {
    fn from(value: ScoringError) -> Self {
        AppError::BadRequest(value.to_string())
    }
}
