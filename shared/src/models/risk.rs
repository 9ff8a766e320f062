//! Disease risk models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Discrete disease risk level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Classify a fuzzy assessment score on the [0,10] scale
    ///
    /// Thresholds: >7.0 High, >4.0 Medium, else Low.
    pub fn from_assessment_score(score: f64) -> Self {
        if score > 7.0 {
            RiskLevel::High
        } else if score > 4.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// Classify an additive daily outbreak score (integer 0-6)
    ///
    /// Thresholds: >=4 High, >=2 Medium, else Low. This scale is distinct
    /// from the fuzzy assessment scale and the two are kept separate on
    /// purpose.
    pub fn from_outbreak_score(score: i32) -> Self {
        if score >= 4 {
            RiskLevel::High
        } else if score >= 2 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

/// Result of a fuzzy environmental risk assessment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RiskAssessment {
    /// Continuous risk score in [0,10] (centroid of the fuzzy output)
    pub risk_score: f64,
    /// Discrete level derived from the score
    pub risk_level: RiskLevel,
}

/// Outbreak risk verdict for a single forecast day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyRisk {
    /// Same date as the corresponding forecast day
    pub date: NaiveDate,
    pub risk_level: RiskLevel,
    /// Additive score in 0-6
    pub risk_score: i32,
    /// Human-readable explanation for the verdict
    pub reason: String,
}
