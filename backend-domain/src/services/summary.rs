use crate::entities::{AnalysisResult, FraudComparison, RiskBucket, ScoredTransaction, Statistics};
use crate::value_objects::RiskLevel;

const COMPARISON_BUCKET: &str = "Analysis";

pub fn summarize(transactions: Vec<ScoredTransaction>) -> AnalysisResult {
    let statistics = statistics(&transactions);
    let risk_distribution = RiskLevel::ALL
        .iter()
        .map(|level| RiskBucket {
            name: level.as_str().to_string(),
            value: transactions
                .iter()
                .filter(|tx| tx.risk_level == *level)
                .count(),
            color: level.color().to_string(),
        })
        .collect();
    let fraud_comparison = vec![FraudComparison {
        name: COMPARISON_BUCKET.to_string(),
        fraudulent: statistics.suspicious_count,
        normal: statistics.total_transactions - statistics.suspicious_count,
    }];
    AnalysisResult {
        transactions,
        statistics,
        risk_distribution,
        fraud_comparison,
    }
}

fn statistics(transactions: &[ScoredTransaction]) -> Statistics {
    let total = transactions.len();
    let suspicious = transactions.iter().filter(|tx| tx.is_suspicious);
    let suspicious_count = suspicious.clone().count();
    let total_at_risk: f64 = suspicious.map(|tx| tx.amount).sum();
    let fraud_rate = if total == 0 {
        0.0
    } else {
        round_one_decimal(suspicious_count as f64 / total as f64 * 100.0)
    };
    Statistics {
        total_transactions: total,
        suspicious_count,
        fraud_rate,
        total_at_risk,
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
