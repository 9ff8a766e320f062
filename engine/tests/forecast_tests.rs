//! Forecast risk evaluator tests
//!
//! Covers the concrete outbreak scenarios, fail-fast error ordering, the
//! length/order/date invariants and registry extension.

use chrono::NaiveDate;
use proptest::prelude::*;

use crop_risk_engine::{
    DiseaseRule, DiseaseRuleRegistry, EngineError, ForecastRiskEvaluator,
    MODERATE_WEATHER_MESSAGE,
};
use shared::{ForecastDay, RiskLevel};

/// Build one forecast day with the fields the scoring rules read
fn day(offset: u64, temp_max: f64, humidity_mean: f64, precipitation: f64) -> ForecastDay {
    let base = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    ForecastDay {
        date: base + chrono::Days::new(offset),
        temp_max,
        temp_min: temp_max - 8.0,
        humidity_mean,
        precipitation,
    }
}

/// A 7-day forecast repeating the same weather
fn week(temp_max: f64, humidity_mean: f64, precipitation: f64) -> Vec<ForecastDay> {
    (0..7)
        .map(|i| day(i, temp_max, humidity_mean, precipitation))
        .collect()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Hot, humid and rainy week trips every baseline rule plus the
    /// Phytophthora outbreak condition: 1 + 1 + 1 + 3 = 6
    #[test]
    fn test_phytophthora_outbreak_scenario() {
        let evaluator = ForecastRiskEvaluator::default();
        let forecast = week(30.0, 90.0, 10.0);
        let risks = evaluator
            .predict_daily_risk(&forecast, "Phytophthora_blight")
            .unwrap();

        let expected_reason = DiseaseRuleRegistry::builtin()
            .get("Phytophthora_blight")
            .unwrap()
            .high_risk_message();

        for daily in &risks {
            assert_eq!(daily.risk_score, 6);
            assert_eq!(daily.risk_level, RiskLevel::High);
            assert_eq!(daily.reason, expected_reason);
        }
    }

    /// Mild dry week scores zero for anthracnose
    #[test]
    fn test_anthracnose_calm_scenario() {
        let evaluator = ForecastRiskEvaluator::default();
        let forecast = week(22.0, 60.0, 0.0);
        let risks = evaluator
            .predict_daily_risk(&forecast, "Pepper_Anthracnose")
            .unwrap();

        for daily in &risks {
            assert_eq!(daily.risk_score, 0);
            assert_eq!(daily.risk_level, RiskLevel::Low);
            assert_eq!(daily.reason, MODERATE_WEATHER_MESSAGE);
        }
    }

    /// Baseline heuristics alone reach Medium without the outbreak condition
    #[test]
    fn test_baseline_scoring_without_outbreak_condition() {
        let evaluator = ForecastRiskEvaluator::default();
        // humidity > 80, temp > 28, rain > 1 but below the Phytophthora
        // thresholds (humidity <= 85, rain <= 5)
        let forecast = week(29.0, 82.0, 2.0);
        let risks = evaluator
            .predict_daily_risk(&forecast, "Phytophthora_blight")
            .unwrap();

        for daily in &risks {
            assert_eq!(daily.risk_score, 3);
            assert_eq!(daily.risk_level, RiskLevel::Medium);
            assert_eq!(daily.reason, MODERATE_WEATHER_MESSAGE);
        }
    }

    /// Unknown disease keys fail hard and produce no output
    #[test]
    fn test_unknown_disease_key() {
        let evaluator = ForecastRiskEvaluator::default();
        let forecast = week(30.0, 90.0, 10.0);
        let err = evaluator
            .predict_daily_risk(&forecast, "NotARealDisease")
            .unwrap_err();
        assert!(matches!(err, EngineError::UnknownDiseaseKey(_)));
    }

    /// The key check fires before the forecast is even looked at
    #[test]
    fn test_unknown_key_reported_before_forecast_shape() {
        let evaluator = ForecastRiskEvaluator::default();
        let too_short = vec![day(0, 30.0, 90.0, 10.0)];
        let err = evaluator
            .predict_daily_risk(&too_short, "NotARealDisease")
            .unwrap_err();
        assert!(matches!(err, EngineError::UnknownDiseaseKey(_)));
    }

    /// Forecasts that are not exactly 7 days long are malformed
    #[test]
    fn test_wrong_length_is_malformed() {
        let evaluator = ForecastRiskEvaluator::default();

        let six: Vec<ForecastDay> = (0..6).map(|i| day(i, 25.0, 70.0, 0.0)).collect();
        assert!(matches!(
            evaluator.predict_daily_risk(&six, "Phytophthora_blight"),
            Err(EngineError::MalformedForecast(_))
        ));

        let eight: Vec<ForecastDay> = (0..8).map(|i| day(i, 25.0, 70.0, 0.0)).collect();
        assert!(matches!(
            evaluator.predict_daily_risk(&eight, "Phytophthora_blight"),
            Err(EngineError::MalformedForecast(_))
        ));
    }

    /// Non-finite or negative fields fail before any day is scored
    #[test]
    fn test_bad_day_fields_are_invalid_input() {
        let evaluator = ForecastRiskEvaluator::default();

        let mut forecast = week(25.0, 70.0, 0.0);
        forecast[3].humidity_mean = f64::NAN;
        assert!(matches!(
            evaluator.predict_daily_risk(&forecast, "Phytophthora_blight"),
            Err(EngineError::InvalidInput(_))
        ));

        let mut forecast = week(25.0, 70.0, 0.0);
        forecast[6].precipitation = -2.0;
        assert!(matches!(
            evaluator.predict_daily_risk(&forecast, "Phytophthora_blight"),
            Err(EngineError::InvalidInput(_))
        ));
    }

    /// Output carries the input's length, order and dates
    #[test]
    fn test_output_preserves_dates_and_order() {
        let evaluator = ForecastRiskEvaluator::default();
        let forecast: Vec<ForecastDay> = (0..7)
            .map(|i| day(i, 20.0 + i as f64 * 2.0, 70.0, 0.0))
            .collect();
        let risks = evaluator
            .predict_daily_risk(&forecast, "Pepper_Anthracnose")
            .unwrap();

        assert_eq!(risks.len(), forecast.len());
        for (input, output) in forecast.iter().zip(&risks) {
            assert_eq!(input.date, output.date);
        }
    }

    /// Pure function: identical input, identical output
    #[test]
    fn test_prediction_is_deterministic() {
        let evaluator = ForecastRiskEvaluator::default();
        let forecast = week(27.0, 88.0, 3.0);
        let first = evaluator
            .predict_daily_risk(&forecast, "Phytophthora_blight")
            .unwrap();
        let second = evaluator
            .predict_daily_risk(&forecast, "Phytophthora_blight")
            .unwrap();
        assert_eq!(first, second);
    }

    /// The anthracnose condition needs warmth inside (24,32) and very high
    /// humidity
    #[test]
    fn test_anthracnose_outbreak_condition_bounds() {
        let evaluator = ForecastRiskEvaluator::default();

        // 30°C, 92% humidity: condition holds, 1 + 1 + 0 + 3 = 5
        let risks = evaluator
            .predict_daily_risk(&week(30.0, 92.0, 0.0), "Pepper_Anthracnose")
            .unwrap();
        assert_eq!(risks[0].risk_score, 5);
        assert_eq!(risks[0].risk_level, RiskLevel::High);

        // 32°C is outside the open interval, condition does not hold
        let risks = evaluator
            .predict_daily_risk(&week(32.0, 92.0, 0.0), "Pepper_Anthracnose")
            .unwrap();
        assert_eq!(risks[0].risk_score, 2);
        assert_eq!(risks[0].risk_level, RiskLevel::Medium);
    }

    /// The built-in registry knows both shipped diseases
    #[test]
    fn test_builtin_registry_keys() {
        let registry = DiseaseRuleRegistry::builtin();
        let mut keys: Vec<&str> = registry.keys().collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["Pepper_Anthracnose", "Phytophthora_blight"]);
        assert_eq!(
            registry.get("Phytophthora_blight").unwrap().name(),
            "Phytophthora Blight"
        );
    }

    /// New disease keys can be registered at construction time
    #[test]
    fn test_registry_extension() {
        let registry = DiseaseRuleRegistry::builtin().with_rule(
            "Downy_mildew",
            DiseaseRule::new(
                "Downy Mildew",
                |day| day.humidity_mean > 95.0,
                "Saturated air keeps leaves wet and lets downy mildew sporulate.",
            ),
        );
        let evaluator = ForecastRiskEvaluator::new(registry);

        // 1 (humidity > 80) + 3 (condition) = 4
        let risks = evaluator
            .predict_daily_risk(&week(20.0, 96.0, 0.0), "Downy_mildew")
            .unwrap();
        assert_eq!(risks[0].risk_score, 4);
        assert_eq!(risks[0].risk_level, RiskLevel::High);
        assert_eq!(
            risks[0].reason,
            "Saturated air keeps leaves wet and lets downy mildew sporulate."
        );
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for a plausible forecast day's scored fields
    fn day_fields_strategy() -> impl Strategy<Value = (f64, f64, f64)> {
        (
            (100i64..=400i64).prop_map(|n| n as f64 / 10.0), // temp_max 10-40°C
            (300i64..=1000i64).prop_map(|n| n as f64 / 10.0), // humidity 30-100%
            (0i64..=500i64).prop_map(|n| n as f64 / 10.0),   // rain 0-50mm
        )
    }

    /// Strategy for a full 7-day forecast
    fn forecast_strategy() -> impl Strategy<Value = Vec<ForecastDay>> {
        prop::collection::vec(day_fields_strategy(), 7).prop_map(|days| {
            days.into_iter()
                .enumerate()
                .map(|(i, (temp_max, humidity, rain))| day(i as u64, temp_max, humidity, rain))
                .collect()
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Seven days in, seven verdicts out, dates preserved in order
        #[test]
        fn prop_seven_in_seven_out(forecast in forecast_strategy()) {
            let evaluator = ForecastRiskEvaluator::default();
            let risks = evaluator
                .predict_daily_risk(&forecast, "Phytophthora_blight")
                .unwrap();

            prop_assert_eq!(risks.len(), 7);
            for (input, output) in forecast.iter().zip(&risks) {
                prop_assert_eq!(input.date, output.date);
            }
        }

        /// The additive score stays on its 0-6 scale and the level is its
        /// image under the discrete thresholds
        #[test]
        fn prop_score_and_level_consistent(forecast in forecast_strategy()) {
            let evaluator = ForecastRiskEvaluator::default();
            let risks = evaluator
                .predict_daily_risk(&forecast, "Pepper_Anthracnose")
                .unwrap();

            for daily in &risks {
                prop_assert!((0..=6).contains(&daily.risk_score));
                prop_assert_eq!(
                    daily.risk_level,
                    RiskLevel::from_outbreak_score(daily.risk_score)
                );
            }
        }

        /// The reason is the disease message exactly on high-risk days
        #[test]
        fn prop_reason_matches_level(forecast in forecast_strategy()) {
            let evaluator = ForecastRiskEvaluator::default();
            let registry = DiseaseRuleRegistry::builtin();
            let message = registry.get("Phytophthora_blight").unwrap().high_risk_message();

            let risks = evaluator
                .predict_daily_risk(&forecast, "Phytophthora_blight")
                .unwrap();

            for daily in &risks {
                if daily.risk_level == RiskLevel::High {
                    prop_assert_eq!(&daily.reason, message);
                } else {
                    prop_assert_eq!(&daily.reason, MODERATE_WEATHER_MESSAGE);
                }
            }
        }

        /// Pure function over arbitrary valid forecasts
        #[test]
        fn prop_prediction_deterministic(forecast in forecast_strategy()) {
            let evaluator = ForecastRiskEvaluator::default();
            let first = evaluator
                .predict_daily_risk(&forecast, "Phytophthora_blight")
                .unwrap();
            let second = evaluator
                .predict_daily_risk(&forecast, "Phytophthora_blight")
                .unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
