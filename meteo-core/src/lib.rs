//! Core library for the `meteo` weather dashboard.
//!
//! This crate defines:
//! - Input validation shared by flags and prompts
//! - Geocoding and weather lookups against Open-Meteo
//! - Shared domain models and the error taxonomy
//! - Configuration defaults
//!
//! It is used by `meteo-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod codes;
pub mod config;
pub mod error;
pub mod geocoder;
pub mod model;
pub mod transport;
pub mod validate;

pub use client::WeatherClient;
pub use codes::describe;
pub use config::Config;
pub use error::WeatherError;
pub use geocoder::Geocoder;
pub use model::{CurrentWeather, ForecastColumns, ForecastDay, ForecastSeries, Location};
pub use transport::{HttpTransport, Transport};
pub use validate::{parse_forecast_days, validate_city, validate_forecast_days, validate_timeout};
