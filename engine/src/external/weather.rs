//! Weather API client for fetching weather data
//!
//! Integrates with the Open-Meteo forecast API for current conditions and
//! 7-day daily forecasts, producing exactly the structures the risk engine
//! consumes.

use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use shared::{ForecastDay, GpsCoordinates, WeatherReading};

const OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Open-Meteo API client
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
}

/// Open-Meteo current-conditions response
#[derive(Debug, Deserialize)]
struct OMCurrentResponse {
    current: Option<OMCurrent>,
}

#[derive(Debug, Deserialize)]
struct OMCurrent {
    temperature_2m: Option<f64>,
    relative_humidity_2m: Option<f64>,
}

/// Open-Meteo daily-forecast response
#[derive(Debug, Deserialize)]
struct OMDailyResponse {
    daily: Option<OMDaily>,
}

#[derive(Debug, Deserialize, Default)]
struct OMDaily {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    temperature_2m_max: Vec<f64>,
    #[serde(default)]
    temperature_2m_min: Vec<f64>,
    #[serde(default)]
    relative_humidity_2m_mean: Vec<f64>,
    #[serde(default)]
    precipitation_sum: Vec<f64>,
}

impl OpenMeteoClient {
    /// Create a new OpenMeteoClient
    pub fn new() -> Self {
        Self::with_base_url(OPEN_METEO_URL.to_string())
    }

    /// Create a new OpenMeteoClient with custom base URL (for testing)
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Fetch the current temperature and relative humidity for a location
    pub async fn get_current_weather(
        &self,
        coords: &GpsCoordinates,
    ) -> EngineResult<WeatherReading> {
        let url = format!(
            "{}?latitude={}&longitude={}&current=temperature_2m,relative_humidity_2m&timezone=auto",
            self.base_url, coords.latitude, coords.longitude
        );

        let data: OMCurrentResponse = self.fetch(&url).await?;
        Self::convert_current_response(data)
    }

    /// Fetch the 7-day daily forecast for a location
    pub async fn get_daily_forecast(
        &self,
        coords: &GpsCoordinates,
    ) -> EngineResult<Vec<ForecastDay>> {
        let url = format!(
            "{}?latitude={}&longitude={}&daily=temperature_2m_max,temperature_2m_min,\
             relative_humidity_2m_mean,precipitation_sum&timezone=auto&forecast_days=7",
            self.base_url, coords.latitude, coords.longitude
        );

        let data: OMDailyResponse = self.fetch(&url).await?;
        Self::convert_daily_response(data)
    }

    async fn fetch<T: serde::de::DeserializeOwned>(&self, url: &str) -> EngineResult<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| EngineError::WeatherService(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::WeatherService(format!(
                "API error: {} - {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| EngineError::WeatherService(format!("failed to parse response: {}", e)))
    }

    /// Convert an Open-Meteo current response to a weather reading
    fn convert_current_response(data: OMCurrentResponse) -> EngineResult<WeatherReading> {
        let current = data
            .current
            .ok_or_else(|| EngineError::WeatherService("incomplete current payload".to_string()))?;

        match (current.temperature_2m, current.relative_humidity_2m) {
            (Some(temperature), Some(humidity)) => Ok(WeatherReading::new(temperature, humidity)),
            _ => Err(EngineError::WeatherService(
                "incomplete current payload".to_string(),
            )),
        }
    }

    /// Convert an Open-Meteo daily response to forecast days
    fn convert_daily_response(data: OMDailyResponse) -> EngineResult<Vec<ForecastDay>> {
        let daily = data
            .daily
            .ok_or_else(|| EngineError::WeatherService("incomplete daily payload".to_string()))?;

        let days = daily.time.len();
        if days == 0
            || daily.temperature_2m_max.len() != days
            || daily.temperature_2m_min.len() != days
            || daily.relative_humidity_2m_mean.len() != days
            || daily.precipitation_sum.len() != days
        {
            return Err(EngineError::WeatherService(
                "incomplete daily payload".to_string(),
            ));
        }

        let mut forecast = Vec::with_capacity(days);
        for i in 0..days {
            let date = NaiveDate::parse_from_str(&daily.time[i], "%Y-%m-%d").map_err(|e| {
                EngineError::WeatherService(format!("bad date '{}': {}", daily.time[i], e))
            })?;
            forecast.push(ForecastDay {
                date,
                temp_max: daily.temperature_2m_max[i],
                temp_min: daily.temperature_2m_min[i],
                humidity_mean: daily.relative_humidity_2m_mean[i],
                precipitation: daily.precipitation_sum[i],
            });
        }
        Ok(forecast)
    }
}

impl Default for OpenMeteoClient {
    fn default() -> Self {
        Self::new()
    }
}
