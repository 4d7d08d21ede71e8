use crate::services::rules::{is_micro_transaction, is_off_hours, is_round_number};

pub const NORMAL_TRANSACTION: &str = "Normal transaction";

const LARGE_AMOUNT_THRESHOLD: f64 = 5_000.0;
const ML_UNUSUAL_THRESHOLD: f64 = 70.0;
const ML_ANOMALOUS_THRESHOLD: f64 = 50.0;
const CRITICAL_RISK_THRESHOLD: f64 = 75.0;
const ELEVATED_RISK_THRESHOLD: f64 = 50.0;

/// Human-readable explanations, in a fixed order. Never empty.
pub fn build_reasons(amount: f64, hour: Option<f64>, ml_score: f64, risk_score: f64) -> Vec<String> {
    let mut reasons = Vec::new();

    if is_micro_transaction(amount) {
        reasons.push(format!("Micro-transaction: ${:.2}", amount));
    } else if amount > LARGE_AMOUNT_THRESHOLD {
        reasons.push(format!("Large amount: ${:.2}", amount));
    }

    if is_round_number(amount) {
        reasons.push("Suspicious round number".to_string());
    }

    if let Some(hour) = hour.filter(|hour| is_off_hours(*hour)) {
        reasons.push(format!("Late night transaction ({}:00)", hour.trunc() as i64));
    }

    if ml_score > ML_UNUSUAL_THRESHOLD {
        reasons.push("ML detected unusual pattern".to_string());
    } else if ml_score > ML_ANOMALOUS_THRESHOLD {
        reasons.push("Anomalous transaction behavior".to_string());
    }

    if risk_score > CRITICAL_RISK_THRESHOLD {
        reasons.push("Critical risk level".to_string());
    } else if risk_score > ELEVATED_RISK_THRESHOLD && reasons.is_empty() {
        reasons.push("Multiple risk indicators detected".to_string());
    }

    if reasons.is_empty() {
        reasons.push(NORMAL_TRANSACTION.to_string());
    }
    reasons
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn micro_transaction_formats_two_decimals() {
        assert_eq!(
            build_reasons(0.5, None, 10.0, 20.0),
            vec!["Micro-transaction: $0.50"]
        );
    }

    #[test]
    fn large_round_amount_at_night() {
        assert_eq!(
            build_reasons(6_000.0, Some(3.75), 75.0, 80.0),
            vec![
                "Large amount: $6000.00",
                "Suspicious round number",
                "Late night transaction (3:00)",
                "ML detected unusual pattern",
                "Critical risk level",
            ]
        );
    }

    #[test]
    fn ml_tiers_are_exclusive() {
        assert_eq!(
            build_reasons(20.0, None, 60.0, 24.0),
            vec!["Anomalous transaction behavior"]
        );
        assert_eq!(build_reasons(20.0, None, 50.0, 20.0), vec![NORMAL_TRANSACTION]);
    }

    #[test]
    fn elevated_risk_only_when_nothing_else_fired() {
        assert_eq!(
            build_reasons(20.0, None, 40.0, 60.0),
            vec!["Multiple risk indicators detected"]
        );
        assert_eq!(
            build_reasons(200.0, None, 40.0, 60.0),
            vec!["Suspicious round number"]
        );
    }

    #[test]
    fn hundred_is_not_a_round_number() {
        assert_eq!(build_reasons(100.0, None, 0.0, 0.0), vec![NORMAL_TRANSACTION]);
    }

    #[test]
    fn daytime_hour_adds_nothing() {
        assert_eq!(build_reasons(20.0, Some(12.0), 0.0, 0.0), vec![NORMAL_TRANSACTION]);
    }
}
