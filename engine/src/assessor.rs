//! Fuzzy environmental risk assessment
//!
//! Maps a single (temperature, humidity) reading onto a continuous disease
//! risk score in [0,10] plus a discrete level, using the expert rule base
//! over linguistic variables instead of a hard threshold table.

use shared::{validate_reading, RiskAssessment, RiskLevel, WeatherReading};

use crate::error::{EngineError, EngineResult};
use crate::fuzzy::{FuzzyRule, FuzzyVariable, InferenceEngine, MembershipFunction};

/// Fuzzy risk assessor over instantaneous weather readings
///
/// Variables and rules are built once at construction; every call to
/// [`assess`](Self::assess) is a pure function of its arguments.
#[derive(Debug, Clone)]
pub struct FuzzyRiskAssessor {
    engine: InferenceEngine,
}

impl FuzzyRiskAssessor {
    pub fn new() -> Self {
        let temperature = FuzzyVariable::new("temperature", 15.0, 40.0)
            .with_set(
                "cool",
                MembershipFunction::Trapezoidal {
                    a: 15.0,
                    b: 15.0,
                    c: 22.0,
                    d: 26.0,
                },
            )
            .with_set(
                "warm",
                MembershipFunction::Triangular {
                    a: 24.0,
                    b: 28.0,
                    c: 32.0,
                },
            )
            .with_set(
                "hot",
                MembershipFunction::Trapezoidal {
                    a: 30.0,
                    b: 34.0,
                    c: 40.0,
                    d: 40.0,
                },
            );

        let humidity = FuzzyVariable::new("humidity", 40.0, 100.0)
            .with_set(
                "low",
                MembershipFunction::Trapezoidal {
                    a: 40.0,
                    b: 40.0,
                    c: 55.0,
                    d: 65.0,
                },
            )
            .with_set(
                "medium",
                MembershipFunction::Triangular {
                    a: 60.0,
                    b: 75.0,
                    c: 90.0,
                },
            )
            .with_set(
                "high",
                MembershipFunction::Trapezoidal {
                    a: 85.0,
                    b: 95.0,
                    c: 100.0,
                    d: 100.0,
                },
            );

        let disease_risk = FuzzyVariable::new("disease_risk", 0.0, 10.0)
            .with_set(
                "low",
                MembershipFunction::Triangular {
                    a: 0.0,
                    b: 2.0,
                    c: 4.0,
                },
            )
            .with_set(
                "medium",
                MembershipFunction::Triangular {
                    a: 3.0,
                    b: 5.0,
                    c: 7.0,
                },
            )
            .with_set(
                "high",
                MembershipFunction::Triangular {
                    a: 6.0,
                    b: 8.0,
                    c: 10.0,
                },
            );

        // Expert rule base: heat and moisture drive risk up, dryness or a
        // cool canopy pull it down regardless of the other reading.
        let rules = vec![
            FuzzyRule::new(
                vec![("temperature", "hot"), ("humidity", "high")],
                "high",
            ),
            FuzzyRule::new(
                vec![("temperature", "hot"), ("humidity", "medium")],
                "medium",
            ),
            FuzzyRule::new(
                vec![("temperature", "warm"), ("humidity", "high")],
                "high",
            ),
            FuzzyRule::new(
                vec![("temperature", "warm"), ("humidity", "medium")],
                "medium",
            ),
            FuzzyRule::new(vec![("humidity", "low")], "low"),
            FuzzyRule::new(vec![("temperature", "cool")], "low"),
        ];

        Self {
            engine: InferenceEngine::new(vec![temperature, humidity], disease_risk, rules),
        }
    }

    /// Assess the disease risk of an instantaneous reading
    ///
    /// Values outside the variable universes (15-40°C, 40-100%) saturate at
    /// the nearest boundary; NaN or infinite input fails with
    /// [`EngineError::InvalidInput`].
    pub fn assess(&self, temperature: f64, humidity: f64) -> EngineResult<RiskAssessment> {
        let reading = WeatherReading::new(temperature, humidity);
        validate_reading(&reading).map_err(|msg| EngineError::InvalidInput(msg.to_string()))?;

        let score = self
            .engine
            .infer(&[("temperature", temperature), ("humidity", humidity)])?;
        let level = RiskLevel::from_assessment_score(score);

        tracing::debug!(temperature, humidity, score, level = %level, "risk assessed");

        Ok(RiskAssessment {
            risk_score: score,
            risk_level: level,
        })
    }

    /// Assess a reading produced by the weather collaborator
    pub fn assess_reading(&self, reading: &WeatherReading) -> EngineResult<RiskAssessment> {
        self.assess(reading.temperature, reading.humidity)
    }
}

impl Default for FuzzyRiskAssessor {
    fn default() -> Self {
        Self::new()
    }
}
