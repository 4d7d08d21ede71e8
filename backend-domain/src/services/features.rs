use crate::entities::{TransactionTable, AMOUNT_COLUMN, TIME_COLUMN};
use crate::error::ScoringError;

/// Anonymized feature columns are `V` followed by digits; at most this many are used.
pub const MAX_ANONYMIZED_FEATURES: usize = 5;

const SECONDS_PER_HOUR: f64 = 3600.0;
const HOURS_PER_DAY: f64 = 24.0;

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSet {
    pub names: Vec<String>,
    /// `Amount` per row, missing values imputed with the batch mean.
    pub amounts: Vec<f64>,
    /// Hour of day per row when the batch carries `Time`; `None` for rows without a time.
    pub hours: Option<Vec<Option<f64>>>,
    /// Standardized feature matrix, one row per transaction.
    pub matrix: Vec<Vec<f64>>,
}

pub fn extract_features(table: &TransactionTable) -> Result<FeatureSet, ScoringError> {
    let mut names = vec![AMOUNT_COLUMN.to_string()];
    let amounts = impute_mean(AMOUNT_COLUMN, &table.numeric_column(AMOUNT_COLUMN)?)?;
    let mut columns = vec![amounts.clone()];

    let hours = if table.has_column(TIME_COLUMN) {
        let hours = table
            .numeric_column(TIME_COLUMN)?
            .into_iter()
            .map(|time| time.map(hour_of_day))
            .collect::<Vec<_>>();
        names.push("Hour".to_string());
        columns.push(impute_mean(TIME_COLUMN, &hours)?);
        Some(hours)
    } else {
        None
    };

    for name in table
        .columns()
        .iter()
        .filter(|name| is_anonymized_feature(name))
        .take(MAX_ANONYMIZED_FEATURES)
    {
        columns.push(impute_mean(name, &table.numeric_column(name)?)?);
        names.push(name.clone());
    }

    for column in &mut columns {
        standardize(column);
    }
    let matrix = (0..table.len())
        .map(|row| columns.iter().map(|column| column[row]).collect())
        .collect();

    Ok(FeatureSet {
        names,
        amounts,
        hours,
        matrix,
    })
}

pub fn hour_of_day(time_seconds: f64) -> f64 {
    (time_seconds / SECONDS_PER_HOUR).rem_euclid(HOURS_PER_DAY)
}

pub fn is_anonymized_feature(name: &str) -> bool {
    name.starts_with('V')
}

fn impute_mean(column: &str, values: &[Option<f64>]) -> Result<Vec<f64>, ScoringError> {
    let present = values.iter().flatten().copied().collect::<Vec<_>>();
    if present.is_empty() {
        return Err(ScoringError::NoNumericValues(column.to_string()));
    }
    let mean = present.iter().sum::<f64>() / present.len() as f64;
    Ok(values.iter().map(|value| value.unwrap_or(mean)).collect())
}

/// Zero mean, unit (population) variance. Constant columns become all zeros.
pub fn standardize(values: &mut [f64]) {
    if values.is_empty() {
        return;
    }
    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;
    let variance = values.iter().map(|value| (value - mean).powi(2)).sum::<f64>() / count;
    let scale = if variance > 0.0 { variance.sqrt() } else { 1.0 };
    for value in values.iter_mut() {
        *value = (*value - mean) / scale;
    }
}
