//! Validation utilities for the Crop Disease Diagnosis Platform

use crate::models::{ForecastDay, WeatherReading, FORECAST_DAYS};

// ============================================================================
// Weather Input Validations
// ============================================================================

/// Validate an instantaneous weather reading
///
/// Rejects NaN and infinite fields. Values outside the engine's universes
/// are accepted here; the engine saturates them at the universe bounds.
pub fn validate_reading(reading: &WeatherReading) -> Result<(), &'static str> {
    if !reading.temperature.is_finite() {
        return Err("temperature must be a finite number");
    }
    if !reading.humidity.is_finite() {
        return Err("humidity must be a finite number");
    }
    Ok(())
}

/// Validate a single forecast day's numeric fields
pub fn validate_forecast_day(day: &ForecastDay) -> Result<(), &'static str> {
    if !day.temp_max.is_finite() {
        return Err("temp_max must be a finite number");
    }
    if !day.temp_min.is_finite() {
        return Err("temp_min must be a finite number");
    }
    if !day.humidity_mean.is_finite() {
        return Err("humidity_mean must be a finite number");
    }
    if !day.precipitation.is_finite() {
        return Err("precipitation must be a finite number");
    }
    if day.precipitation < 0.0 {
        return Err("precipitation cannot be negative");
    }
    Ok(())
}

/// Validate that a forecast covers exactly the expected number of days
pub fn validate_forecast_length(forecast: &[ForecastDay]) -> Result<(), &'static str> {
    if forecast.len() != FORECAST_DAYS {
        return Err("forecast must contain exactly 7 days");
    }
    Ok(())
}
