// Risk level value object

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::Low,
        RiskLevel::Medium,
        RiskLevel::High,
        RiskLevel::Critical,
    ];

    /// Buckets are right-open except the top one: 25, 50 and 75 start the next tier.
    pub fn from_score(score: f64) -> Self {
        if score >= 75.0 {
            RiskLevel::Critical
        } else if score >= 50.0 {
            RiskLevel::High
        } else if score >= 25.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        }
    }

    /// Chart color for the risk distribution.
    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::Low => "hsl(150 70% 45%)",
            RiskLevel::Medium => "hsl(40 95% 55%)",
            RiskLevel::High => "hsl(25 95% 55%)",
            RiskLevel::Critical => "hsl(0 85% 55%)",
        }
    }
}
