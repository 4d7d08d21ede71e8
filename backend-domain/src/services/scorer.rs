use crate::entities::{AnalysisResult, ScoredTransaction, TransactionTable, ID_COLUMN};
use crate::error::ScoringError;
use crate::ports::AnomalyDetector;
use crate::services::features::extract_features;
use crate::services::reasons::build_reasons;
use crate::services::rules::{rule_score, MAX_SCORE};
use crate::services::summary::summarize;
use crate::value_objects::{RiskLevel, TransactionId};

pub const RULE_WEIGHT: f64 = 0.6;
pub const ML_WEIGHT: f64 = 0.4;
pub const SUSPICIOUS_THRESHOLD: f64 = 50.0;
/// ML score for every row when the batch's anomaly scores have no spread.
pub const FLAT_ML_SCORE: f64 = 50.0;

/// Scores one batch end to end: features, anomaly model, rules, blend, reasons, summary.
pub struct Scorer<'a> {
    detector: &'a dyn AnomalyDetector,
}

impl<'a> Scorer<'a> {
    pub fn new(detector: &'a dyn AnomalyDetector) -> Self {
        Self { detector }
    }

    pub fn score(&self, table: &TransactionTable) -> Result<AnalysisResult, ScoringError> {
        if table.is_empty() {
            return Err(ScoringError::EmptyBatch);
        }
        let features = extract_features(table)?;
        let raw_scores = self.detector.fit_decision(&features.matrix);
        if raw_scores.len() != table.len() {
            return Err(ScoringError::ModelOutput {
                expected: table.len(),
                actual: raw_scores.len(),
            });
        }
        let ml_scores = normalize_anomaly_scores(&raw_scores);
        let mean_amount = features.amounts.iter().sum::<f64>() / features.amounts.len() as f64;
        let id_column = table.column_index(ID_COLUMN);

        let transactions = (0..table.len())
            .map(|row| {
                let amount = features.amounts[row];
                let hour = features.hours.as_ref().and_then(|hours| hours[row]);
                let rule_score = rule_score(amount, hour, mean_amount);
                let ml_score = ml_scores[row];
                let risk_score = blend(rule_score, ml_score);
                let id = id_column
                    .and_then(|column| table.cell(row, column).label())
                    .map(TransactionId)
                    .unwrap_or_else(|| TransactionId::synthetic(row));
                ScoredTransaction {
                    id,
                    amount,
                    risk_score,
                    risk_level: RiskLevel::from_score(risk_score),
                    reasons: build_reasons(amount, hour, ml_score, risk_score),
                    hour,
                    ml_score,
                    rule_score,
                    is_suspicious: risk_score > SUSPICIOUS_THRESHOLD,
                }
            })
            .collect();

        Ok(summarize(transactions))
    }
}

/// Min/max rescales raw anomaly scores to [0, 100], higher meaning more suspicious.
pub fn normalize_anomaly_scores(raw: &[f64]) -> Vec<f64> {
    let min = raw.iter().copied().fold(f64::INFINITY, f64::min);
    let max = raw.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    if !range.is_finite() || range <= 0.0 {
        return vec![FLAT_ML_SCORE; raw.len()];
    }
    raw.iter()
        .map(|score| ((1.0 - (score - min) / range) * MAX_SCORE).clamp(0.0, MAX_SCORE))
        .collect()
}

pub fn blend(rule_score: f64, ml_score: f64) -> f64 {
    RULE_WEIGHT * rule_score.clamp(0.0, MAX_SCORE) + ML_WEIGHT * ml_score.clamp(0.0, MAX_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Cell;
    use crate::services::isolation_forest::IsolationForest;
    use crate::services::reasons::NORMAL_TRANSACTION;

    struct FixedScores(Vec<f64>);

    impl AnomalyDetector for FixedScores {
        fn fit_decision(&self, _samples: &[Vec<f64>]) -> Vec<f64> {
            self.0.clone()
        }
    }

    fn amounts(values: &[f64]) -> TransactionTable {
        let mut table = TransactionTable::new(vec!["Amount".to_string()]);
        for value in values {
            table.push_row(vec![Cell::Number(*value)]);
        }
        table
    }

    #[test]
    fn three_row_scenario() {
        let forest = IsolationForest::default();
        let result = Scorer::new(&forest)
            .score(&amounts(&[0.5, 200.0, 100.0]))
            .expect("score");
        let rows = &result.transactions;
        assert_eq!(rows[0].rule_score, 30.0);
        assert_eq!(rows[0].reasons[0], "Micro-transaction: $0.50");
        assert_eq!(rows[1].rule_score, 20.0);
        assert!(rows[1].reasons.iter().any(|r| r == "Suspicious round number"));
        assert_eq!(rows[2].rule_score, 0.0);
        assert!(!rows[2].reasons.iter().any(|r| r == "Suspicious round number"));
        assert_eq!(rows[2].id.to_string(), "T002");
    }

    #[test]
    fn identical_amounts_fall_back_to_flat_ml_score() {
        let forest = IsolationForest::default();
        let result = Scorer::new(&forest)
            .score(&amounts(&[42.0; 6]))
            .expect("score");
        for tx in &result.transactions {
            assert_eq!(tx.ml_score, FLAT_ML_SCORE);
            assert_eq!(tx.risk_score, 20.0);
            assert_eq!(tx.risk_level, RiskLevel::Low);
            assert_eq!(tx.reasons, vec![NORMAL_TRANSACTION]);
        }
        assert_eq!(result.statistics.suspicious_count, 0);
    }

    #[test]
    fn invariants_hold_for_a_mixed_batch() {
        let mut table = TransactionTable::new(
            ["Time", "Amount", "V1", "V2"]
                .iter()
                .map(ToString::to_string)
                .collect(),
        );
        for i in 0..80 {
            let amount = match i % 9 {
                0 => 0.25,
                1 => 500.0,
                2 => 9_800.0,
                _ => 20.0 + i as f64 * 1.7,
            };
            table.push_row(vec![
                Cell::Number(i as f64 * 1_931.0),
                Cell::Number(amount),
                Cell::Number((i as f64 * 0.37).sin()),
                if i % 11 == 0 { Cell::Missing } else { Cell::Number((i % 7) as f64) },
            ]);
        }
        let forest = IsolationForest::default();
        let result = Scorer::new(&forest).score(&table).expect("score");
        assert_eq!(result.transactions.len(), 80);
        for tx in &result.transactions {
            assert!((0.0..=100.0).contains(&tx.risk_score));
            assert!((0.0..=100.0).contains(&tx.ml_score));
            let expected = 0.6 * tx.rule_score + 0.4 * tx.ml_score;
            assert!((tx.risk_score - expected).abs() < 1e-9);
            assert_eq!(tx.is_suspicious, tx.risk_score > 50.0);
            assert_eq!(tx.risk_level, RiskLevel::from_score(tx.risk_score));
            assert!(!tx.reasons.is_empty());
            let normal = tx.reasons.iter().any(|r| r == NORMAL_TRANSACTION);
            assert_eq!(normal, tx.reasons.len() == 1 && tx.reasons[0] == NORMAL_TRANSACTION);
        }
        let suspicious = result.transactions.iter().filter(|tx| tx.is_suspicious);
        let at_risk: f64 = suspicious.map(|tx| tx.amount).sum();
        assert!((result.statistics.total_at_risk - at_risk).abs() < 1e-9);
    }

    #[test]
    fn most_anomalous_row_gets_full_ml_score() {
        let detector = FixedScores(vec![0.1, -0.3, 0.05]);
        let result = Scorer::new(&detector)
            .score(&amounts(&[10.0, 20.0, 30.0]))
            .expect("score");
        let ml = result
            .transactions
            .iter()
            .map(|tx| tx.ml_score)
            .collect::<Vec<_>>();
        assert_eq!(ml[1], 100.0);
        assert_eq!(ml[0], 0.0);
        assert!((ml[2] - 12.5).abs() < 1e-9);
        assert_eq!(
            result.transactions[1].reasons,
            vec!["ML detected unusual pattern"]
        );
    }

    #[test]
    fn critical_when_rules_and_model_agree() {
        let mut table = TransactionTable::new(vec!["Amount".to_string(), "Time".to_string()]);
        for _ in 0..9 {
            table.push_row(vec![Cell::Number(10.0), Cell::Number(12.0 * 3_600.0)]);
        }
        table.push_row(vec![Cell::Number(1_000.0), Cell::Number(23.5 * 3_600.0)]);
        let mut scores = vec![0.2; 9];
        scores.push(-0.4);
        let detector = FixedScores(scores);
        let result = Scorer::new(&detector).score(&table).expect("score");
        let flagged = &result.transactions[9];
        // outlier 40 + round 20 + off-hours 25
        assert_eq!(flagged.rule_score, 85.0);
        assert!((flagged.risk_score - 91.0).abs() < 1e-9);
        assert_eq!(flagged.risk_level, RiskLevel::Critical);
        assert_eq!(
            flagged.reasons,
            vec![
                "Suspicious round number",
                "Late night transaction (23:00)",
                "ML detected unusual pattern",
                "Critical risk level",
            ]
        );
        assert_eq!(result.statistics.suspicious_count, 1);
        assert_eq!(result.statistics.fraud_rate, 10.0);
        assert_eq!(result.statistics.total_at_risk, 1_000.0);
    }

    #[test]
    fn uses_transaction_id_column_when_present() {
        let mut table = amounts(&[5.0, 6.0]);
        table.set_column(ID_COLUMN, vec![Cell::Text("TX-9".to_string()), Cell::Missing]);
        let forest = IsolationForest::default();
        let result = Scorer::new(&forest).score(&table).expect("score");
        assert_eq!(result.transactions[0].id.to_string(), "TX-9");
        assert_eq!(result.transactions[1].id.to_string(), "T001");
    }

    #[test]
    fn empty_batch_fails_fast() {
        let forest = IsolationForest::default();
        let err = Scorer::new(&forest)
            .score(&TransactionTable::new(vec!["Amount".to_string()]))
            .expect_err("empty");
        assert_eq!(err, ScoringError::EmptyBatch);
    }

    #[test]
    fn short_model_output_is_rejected() {
        let detector = FixedScores(vec![0.0]);
        let err = Scorer::new(&detector)
            .score(&amounts(&[1.0, 2.0]))
            .expect_err("mismatch");
        assert_eq!(
            err,
            ScoringError::ModelOutput {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn normalization_handles_flat_and_empty_input() {
        assert_eq!(normalize_anomaly_scores(&[0.3, 0.3]), vec![50.0, 50.0]);
        assert!(normalize_anomaly_scores(&[]).is_empty());
    }
}
