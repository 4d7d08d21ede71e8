// Scoring errors
// Every variant is a user-facing input problem

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("no transactions to analyze")]
    EmptyBatch,
    #[error("missing required column '{0}'")]
    MissingColumn(String),
    #[error("column '{column}' has non-numeric value '{value}' at row {row}")]
    NonNumeric {
        column: String,
        row: usize,
        value: String,
    },
    #[error("column '{0}' has no numeric values")]
    NoNumericValues(String),
    #[error("invalid transaction table: {0}")]
    InvalidTable(String),
    #[error("anomaly model returned {actual} scores for {expected} rows")]
    ModelOutput { expected: usize, actual: usize },
    #[error("cannot sample reference data: {0}")]
    Sampling(String),
}
