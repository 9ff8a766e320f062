//! Forecast-based outbreak risk evaluation
//!
//! Applies an additive weather heuristic plus a disease-specific outbreak
//! condition to each day of a 7-day forecast. This is a crisp rule engine;
//! its integer score scale is unrelated to the fuzzy assessment scale.

use std::collections::HashMap;

use shared::{
    validate_forecast_day, validate_forecast_length, DailyRisk, ForecastDay, RiskLevel,
};

use crate::error::{EngineError, EngineResult};

/// Reason attached to days that do not reach the high-risk level
pub const MODERATE_WEATHER_MESSAGE: &str = "weather conditions are moderate";

/// Outbreak rule for one disease: a predicate over a forecast day plus the
/// explanation reported on high-risk days
#[derive(Debug, Clone)]
pub struct DiseaseRule {
    name: &'static str,
    condition: fn(&ForecastDay) -> bool,
    high_risk_message: &'static str,
}

impl DiseaseRule {
    pub fn new(
        name: &'static str,
        condition: fn(&ForecastDay) -> bool,
        high_risk_message: &'static str,
    ) -> Self {
        Self {
            name,
            condition,
            high_risk_message,
        }
    }

    /// Display name of the disease
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the day's weather satisfies the outbreak condition
    pub fn condition_holds(&self, day: &ForecastDay) -> bool {
        (self.condition)(day)
    }

    pub fn high_risk_message(&self) -> &'static str {
        self.high_risk_message
    }
}

/// Immutable registry of outbreak rules keyed by disease identifier
///
/// Built once at startup and injected into the evaluator; there is no way
/// to mutate it afterwards.
#[derive(Debug, Clone)]
pub struct DiseaseRuleRegistry {
    rules: HashMap<&'static str, DiseaseRule>,
}

impl DiseaseRuleRegistry {
    /// Registry with the built-in expert rules
    pub fn builtin() -> Self {
        let mut rules = HashMap::new();
        rules.insert(
            "Phytophthora_blight",
            DiseaseRule::new(
                "Phytophthora Blight",
                |day| day.temp_max > 25.0 && day.humidity_mean > 85.0 && day.precipitation > 5.0,
                "Hot, humid conditions with significant rainfall create a very high risk of \
                 Phytophthora blight outbreak.",
            ),
        );
        rules.insert(
            "Pepper_Anthracnose",
            DiseaseRule::new(
                "Anthracnose",
                |day| day.temp_max > 24.0 && day.temp_max < 32.0 && day.humidity_mean > 90.0,
                "Warm weather with very high humidity favors anthracnose spore spread and \
                 infection.",
            ),
        );
        Self { rules }
    }

    /// Extend the registry with an additional disease rule at build time
    pub fn with_rule(mut self, key: &'static str, rule: DiseaseRule) -> Self {
        self.rules.insert(key, rule);
        self
    }

    pub fn get(&self, key: &str) -> Option<&DiseaseRule> {
        self.rules.get(key)
    }

    /// Disease keys known to this registry
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.keys().copied()
    }
}

impl Default for DiseaseRuleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Per-day outbreak risk evaluator over a 7-day forecast
#[derive(Debug, Clone, Default)]
pub struct ForecastRiskEvaluator {
    registry: DiseaseRuleRegistry,
}

impl ForecastRiskEvaluator {
    pub fn new(registry: DiseaseRuleRegistry) -> Self {
        Self { registry }
    }

    /// Evaluate outbreak risk for each day of the forecast
    ///
    /// Fails with [`EngineError::UnknownDiseaseKey`] before any per-day
    /// computation when the key is not registered, and with
    /// [`EngineError::MalformedForecast`] / [`EngineError::InvalidInput`]
    /// when the forecast is not a valid 7-day sequence. Never returns a
    /// partial result. Output preserves input length, order and dates.
    pub fn predict_daily_risk(
        &self,
        forecast: &[ForecastDay],
        disease_key: &str,
    ) -> EngineResult<Vec<DailyRisk>> {
        let rule = self
            .registry
            .get(disease_key)
            .ok_or_else(|| EngineError::UnknownDiseaseKey(disease_key.to_string()))?;

        validate_forecast_length(forecast)
            .map_err(|msg| EngineError::MalformedForecast(msg.to_string()))?;
        for day in forecast {
            validate_forecast_day(day)
                .map_err(|msg| EngineError::InvalidInput(format!("{}: {}", day.date, msg)))?;
        }

        tracing::debug!(disease_key, days = forecast.len(), "evaluating forecast risk");

        let predictions = forecast
            .iter()
            .map(|day| {
                let mut score = 0;
                if day.humidity_mean > 80.0 {
                    score += 1;
                }
                if day.temp_max > 28.0 {
                    score += 1;
                }
                if day.precipitation > 1.0 {
                    score += 1;
                }
                // The expert outbreak condition dominates the baseline
                if rule.condition_holds(day) {
                    score += 3;
                }

                let risk_level = RiskLevel::from_outbreak_score(score);
                let reason = if risk_level == RiskLevel::High {
                    rule.high_risk_message().to_string()
                } else {
                    MODERATE_WEATHER_MESSAGE.to_string()
                };

                DailyRisk {
                    date: day.date,
                    risk_level,
                    risk_score: score,
                    reason,
                }
            })
            .collect();

        Ok(predictions)
    }
}
