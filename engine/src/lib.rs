//! Environmental disease-risk engine for the Crop Disease Diagnosis Platform
//!
//! Two pure, stateless evaluators form the engine:
//!
//! - [`FuzzyRiskAssessor`] converts an instantaneous temperature/humidity
//!   reading into a continuous risk score in [0,10] and a discrete level via
//!   max-min fuzzy inference with centroid defuzzification.
//! - [`ForecastRiskEvaluator`] applies disease-specific threshold rules plus
//!   an additive weather heuristic to a 7-day forecast, producing one risk
//!   verdict per day.
//!
//! The engine has no network or persistence surface of its own; the
//! [`external::weather::OpenMeteoClient`] collaborator fetches the inputs it
//! consumes. Both evaluators are safe to call concurrently from any number
//! of threads.

pub mod assessor;
pub mod error;
pub mod external;
pub mod forecast;
pub mod fuzzy;

pub use assessor::FuzzyRiskAssessor;
pub use error::{EngineError, EngineResult};
pub use external::OpenMeteoClient;
pub use forecast::{
    DiseaseRule, DiseaseRuleRegistry, ForecastRiskEvaluator, MODERATE_WEATHER_MESSAGE,
};
