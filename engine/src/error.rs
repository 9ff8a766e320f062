//! Error handling for the environmental risk engine
//!
//! All failures are deterministic client-input or collaborator errors and
//! surface synchronously; nothing is retried internally.

use thiserror::Error;

/// Risk engine error types
#[derive(Error, Debug)]
pub enum EngineError {
    /// Non-numeric, NaN, or otherwise malformed reading/forecast fields
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Disease key not present in the rule registry
    #[error("Unknown disease key: {0}")]
    UnknownDiseaseKey(String),

    /// Forecast sequence of the wrong length or missing required fields
    #[error("Malformed forecast: {0}")]
    MalformedForecast(String),

    /// Weather collaborator request or payload failure
    #[error("Weather service error: {0}")]
    WeatherService(String),

    /// The aggregated fuzzy output carried no mass to defuzzify
    #[error("Inference error: {0}")]
    Inference(String),
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
