use rand::seq::SliceRandom;
use rand::Rng;

use crate::entities::{Cell, TransactionTable, CLASS_COLUMN, ID_COLUMN};
use crate::error::ScoringError;
use crate::value_objects::TransactionId;

pub const FRAUD_SAMPLE_SIZE: usize = 20;
pub const NORMAL_SAMPLE_SIZE: usize = 80;

/// Draws a mixed demo batch from the labelled reference dataset.
///
/// Takes up to [`FRAUD_SAMPLE_SIZE`] rows with `Class == 1` (all of them when fewer exist)
/// and exactly [`NORMAL_SAMPLE_SIZE`] rows with `Class == 0`, shuffles them together and
/// stamps sequential `T000`.. ids into the `transaction_id` column.
pub fn sample_reference<R: Rng + ?Sized>(
    table: &TransactionTable,
    rng: &mut R,
) -> Result<TransactionTable, ScoringError> {
    let labels = table.numeric_column(CLASS_COLUMN)?;
    let (mut fraud, mut normal) = (Vec::new(), Vec::new());
    for (row, label) in labels.into_iter().enumerate() {
        match label {
            Some(value) if value == 1.0 => fraud.push(row),
            Some(value) if value == 0.0 => normal.push(row),
            _ => {}
        }
    }
    if normal.len() < NORMAL_SAMPLE_SIZE {
        return Err(ScoringError::Sampling(format!(
            "need {} rows with {} 0, found {}",
            NORMAL_SAMPLE_SIZE,
            CLASS_COLUMN,
            normal.len()
        )));
    }

    let fraud_take = fraud.len().min(FRAUD_SAMPLE_SIZE);
    let (fraud_rows, _) = fraud.partial_shuffle(rng, fraud_take);
    let mut picked = fraud_rows.to_vec();
    let (normal_rows, _) = normal.partial_shuffle(rng, NORMAL_SAMPLE_SIZE);
    picked.extend_from_slice(normal_rows);
    picked.shuffle(rng);

    let mut sample = table.select_rows(&picked);
    let ids = (0..sample.len())
        .map(|index| Cell::Text(TransactionId::synthetic(index).0))
        .collect();
    sample.set_column(ID_COLUMN, ids);
    Ok(sample)
}
