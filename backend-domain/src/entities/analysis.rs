// Analysis result entity
// Output of one scoring pass; serializes straight into the response body

use serde::{Serialize, Serializer};

use crate::value_objects::{RiskLevel, TransactionId};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredTransaction {
    pub id: TransactionId,
    pub amount: f64,
    #[serde(serialize_with = "serialize_truncated")]
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub reasons: Vec<String>,
    #[serde(skip)]
    pub hour: Option<f64>,
    #[serde(skip)]
    pub ml_score: f64,
    #[serde(skip)]
    pub rule_score: f64,
    #[serde(skip)]
    pub is_suspicious: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_transactions: usize,
    pub suspicious_count: usize,
    pub fraud_rate: f64,
    pub total_at_risk: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskBucket {
    pub name: String,
    pub value: usize,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FraudComparison {
    pub name: String,
    pub fraudulent: usize,
    pub normal: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub transactions: Vec<ScoredTransaction>,
    pub statistics: Statistics,
    pub risk_distribution: Vec<RiskBucket>,
    pub fraud_comparison: Vec<FraudComparison>,
}

// The wire format reports whole-number scores, truncated toward zero.
fn serialize_truncated<S: Serializer>(score: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(score.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_serializes_wire_fields_only() {
        let scored = ScoredTransaction {
            id: TransactionId::synthetic(3),
            amount: 12.5,
            risk_score: 74.9,
            risk_level: RiskLevel::High,
            reasons: vec!["Normal transaction".to_string()],
            hour: Some(3.0),
            ml_score: 80.0,
            rule_score: 70.0,
            is_suspicious: true,
        };
        let value = serde_json::to_value(&scored).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({
                "id": "T003",
                "amount": 12.5,
                "riskScore": 74,
                "riskLevel": "High",
                "reasons": ["Normal transaction"],
            })
        );
    }
}
