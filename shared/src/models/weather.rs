//! Weather data models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of days in a forecast accepted by the risk engine
pub const FORECAST_DAYS: usize = 7;

/// An instantaneous weather reading for a location
///
/// Constructed per request from the weather collaborator; never persisted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeatherReading {
    /// Air temperature in °C
    pub temperature: f64,
    /// Relative humidity in percent (0-100)
    pub humidity: f64,
}

impl WeatherReading {
    pub fn new(temperature: f64, humidity: f64) -> Self {
        Self {
            temperature,
            humidity,
        }
    }
}

/// One day of a weather forecast
///
/// A full forecast is an ordered sequence of exactly [`FORECAST_DAYS`]
/// entries, day 0 being today.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastDay {
    pub date: NaiveDate,
    /// Daily maximum temperature in °C
    pub temp_max: f64,
    /// Daily minimum temperature in °C
    pub temp_min: f64,
    /// Daily mean relative humidity in percent (0-100)
    pub humidity_mean: f64,
    /// Total precipitation in mm (non-negative)
    pub precipitation: f64,
}
