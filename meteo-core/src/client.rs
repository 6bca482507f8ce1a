use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::WeatherError,
    model::{CurrentWeather, ForecastColumns, ForecastSeries, Location},
    transport::Transport,
    validate::MAX_FORECAST_DAYS,
};

pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

const DAILY_FIELDS: &str = "weathercode,temperature_2m_max,temperature_2m_min,\
                            precipitation_sum,windspeed_10m_max,winddirection_10m_dominant";

/// Current conditions and daily forecasts from the Open-Meteo forecast API.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    transport: Arc<dyn Transport>,
    url: String,
}

impl WeatherClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport, url: DEFAULT_FORECAST_URL.to_string() }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub async fn get_current(&self, location: &Location) -> Result<CurrentWeather, WeatherError> {
        let body = self
            .transport
            .get(
                &self.url,
                &[
                    ("latitude", location.latitude.to_string()),
                    ("longitude", location.longitude.to_string()),
                    ("current_weather", "true".to_string()),
                    ("timezone", "auto".to_string()),
                ],
            )
            .await?;

        let current = parse_current(&body)?;
        debug!(?current, "current weather parsed");
        Ok(current)
    }

    /// Daily forecast for `days` days, `1..=16`.
    ///
    /// An out-of-range count is rejected before any request is sent.
    pub async fn get_forecast(
        &self,
        location: &Location,
        days: u8,
    ) -> Result<ForecastSeries, WeatherError> {
        if !(1..=MAX_FORECAST_DAYS).contains(&days) {
            return Err(WeatherError::validation(format!(
                "Forecast days must be between 1 and {MAX_FORECAST_DAYS}, got {days}."
            )));
        }

        let body = self
            .transport
            .get(
                &self.url,
                &[
                    ("latitude", location.latitude.to_string()),
                    ("longitude", location.longitude.to_string()),
                    ("daily", DAILY_FIELDS.to_string()),
                    ("forecast_days", days.to_string()),
                    ("timezone", "auto".to_string()),
                ],
            )
            .await?;

        let series = parse_forecast(&body, usize::from(days))?;
        debug!(days = series.len(), "daily forecast parsed");
        Ok(series)
    }
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    current_weather: Option<RawCurrent>,
}

#[derive(Debug, Deserialize)]
struct RawCurrent {
    temperature: Option<f64>,
    windspeed: Option<f64>,
    weathercode: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct DailyResponse {
    daily: Option<RawDaily>,
}

#[derive(Debug, Deserialize)]
struct RawDaily {
    time: Option<Vec<NaiveDate>>,
    weathercode: Option<Vec<i32>>,
    temperature_2m_max: Option<Vec<f64>>,
    temperature_2m_min: Option<Vec<f64>>,
    precipitation_sum: Option<Vec<f64>>,
    windspeed_10m_max: Option<Vec<f64>>,
    winddirection_10m_dominant: Option<Vec<f64>>,
}

fn parse_current(body: &str) -> Result<CurrentWeather, WeatherError> {
    let parsed: CurrentResponse = serde_json::from_str(body).map_err(|e| {
        WeatherError::malformed(format!("Failed to parse current weather response: {e}"))
    })?;

    let raw = parsed
        .current_weather
        .ok_or_else(|| WeatherError::malformed("Weather data missing from API response."))?;

    Ok(CurrentWeather {
        temperature: require(raw.temperature, "current_weather.temperature")?,
        windspeed: require(raw.windspeed, "current_weather.windspeed")?,
        weather_code: require(raw.weathercode, "current_weather.weathercode")?,
    })
}

fn parse_forecast(body: &str, days: usize) -> Result<ForecastSeries, WeatherError> {
    let parsed: DailyResponse = serde_json::from_str(body).map_err(|e| {
        WeatherError::malformed(format!("Failed to parse daily forecast response: {e}"))
    })?;

    let daily = parsed
        .daily
        .ok_or_else(|| WeatherError::malformed("Daily forecast missing from API response."))?;

    let columns = ForecastColumns {
        dates: require(daily.time, "daily.time")?,
        weather_codes: require(daily.weathercode, "daily.weathercode")?,
        temp_max: require(daily.temperature_2m_max, "daily.temperature_2m_max")?,
        temp_min: require(daily.temperature_2m_min, "daily.temperature_2m_min")?,
        precipitation: require(daily.precipitation_sum, "daily.precipitation_sum")?,
        wind_speed_max: require(daily.windspeed_10m_max, "daily.windspeed_10m_max")?,
        wind_direction: require(
            daily.winddirection_10m_dominant,
            "daily.winddirection_10m_dominant",
        )?,
    };

    ForecastSeries::new(columns, days)
}

fn require<T>(value: Option<T>, field: &str) -> Result<T, WeatherError> {
    value.ok_or_else(|| WeatherError::malformed(format!("Missing '{field}' in API response.")))
}
