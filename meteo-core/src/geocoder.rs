use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::{error::WeatherError, model::Location, transport::Transport};

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

/// Resolves a city name to coordinates with the Open-Meteo geocoding API.
#[derive(Debug, Clone)]
pub struct Geocoder {
    transport: Arc<dyn Transport>,
    url: String,
    language: String,
}

impl Geocoder {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            url: DEFAULT_GEOCODING_URL.to_string(),
            language: "en".to_string(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Best match for `city`. Exactly one request is made.
    pub async fn geocode(&self, city: &str) -> Result<Location, WeatherError> {
        debug!(city, "geocoding");

        let body = self
            .transport
            .get(
                &self.url,
                &[
                    ("name", city.to_string()),
                    ("count", "1".to_string()),
                    ("language", self.language.clone()),
                    ("format", "json".to_string()),
                ],
            )
            .await?;

        let location = parse_geocoding(&body, city)?;
        debug!(
            "Found location: {} ({:.4}, {:.4})",
            location.label(),
            location.latitude,
            location.longitude
        );

        Ok(location)
    }
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    results: Option<Vec<GeoResult>>,
}

#[derive(Debug, Deserialize)]
struct GeoResult {
    name: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    country_code: Option<String>,
    admin1: Option<String>,
}

fn parse_geocoding(body: &str, city: &str) -> Result<Location, WeatherError> {
    let parsed: GeoResponse = serde_json::from_str(body).map_err(|e| {
        WeatherError::malformed(format!("Failed to parse geocoding response: {e}"))
    })?;

    let top = parsed
        .results
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::not_found(format!("City '{city}' not found.")))?;

    let missing = |field: &str| {
        WeatherError::not_found(format!(
            "City '{city}' not found: geocoding result has no '{field}'."
        ))
    };

    let latitude = top.latitude.ok_or_else(|| missing("latitude"))?;
    let longitude = top.longitude.ok_or_else(|| missing("longitude"))?;
    let country_code = top
        .country_code
        .filter(|cc| !cc.is_empty())
        .ok_or_else(|| missing("country_code"))?;

    Ok(Location {
        name: top.name.unwrap_or_else(|| city.to_string()),
        admin1: top.admin1.filter(|a| !a.is_empty()),
        latitude,
        longitude,
        country_code,
    })
}
