use std::sync::Arc;

use clap::Parser;
use meteo_core::{
    Config, Geocoder, HttpTransport, Transport, WeatherClient, WeatherError, parse_forecast_days,
    validate_city, validate_timeout,
};
use tracing::{debug, warn};

use crate::{
    format::{format_current, format_forecast},
    prompt::{Prompter, stdin_prompter},
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "meteo",
    version,
    about = "Weather dashboard using Open-Meteo (no API key needed)",
    long_about = "Current weather and an optional daily forecast for a city.\n\n\
                  Without --city the city and the number of forecast days are asked for \
                  interactively."
)]
pub struct Cli {
    /// City name, e.g. --city "Brno". Prompted for when absent.
    #[arg(short, long)]
    pub city: Option<String>,

    /// Number of forecast days, 0-16 (0 = current weather only).
    #[arg(short, long, value_name = "DAYS", value_parser = parse_forecast_days)]
    pub forecast: Option<u8>,

    /// HTTP timeout in seconds for each request.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<f64>,

    /// Log request details to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

/// What to look up, after flags and prompts have been validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    pub city: String,
    pub forecast_days: u8,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;
        let timeout = validate_timeout(self.timeout.unwrap_or(config.timeout_secs))?;
        let lookup = self.resolve_lookup(&config, stdin_prompter().as_ref())?;
        debug!(city = %lookup.city, days = lookup.forecast_days, ?timeout, "starting lookup");

        let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(timeout)?);
        let geocoder = Geocoder::new(transport.clone())
            .with_url(&config.geocoding_url)
            .with_language(&config.language);
        let client = WeatherClient::new(transport).with_url(&config.forecast_url);

        let report = build_report(&geocoder, &client, &lookup).await.inspect_err(|e| {
            warn!(kind = e.kind(), "lookup failed");
        })?;

        println!("{report}");
        Ok(())
    }

    /// Flags win; whatever is missing in interactive mode is asked for.
    ///
    /// `--city` switches off prompting entirely, so a missing `--forecast` then
    /// means current weather only.
    pub fn resolve_lookup(&self, config: &Config, prompter: &dyn Prompter) -> anyhow::Result<Lookup> {
        if let Some(city) = &self.city {
            return Ok(Lookup {
                city: validate_city(city)?,
                forecast_days: self.forecast.unwrap_or(0),
            });
        }

        let city = prompter.city(config.default_city.as_deref())?;
        let forecast_days = match self.forecast {
            Some(days) => days,
            None => prompter.forecast_days()?,
        };

        Ok(Lookup { city, forecast_days })
    }
}

/// Geocode, then fetch current weather and, if asked for, the forecast.
///
/// The report is only returned once every request has succeeded.
pub async fn build_report(
    geocoder: &Geocoder,
    client: &WeatherClient,
    lookup: &Lookup,
) -> Result<String, WeatherError> {
    let location = geocoder.geocode(&lookup.city).await?;
    let current = client.get_current(&location).await?;
    let mut report = format_current(&location, &current);

    if lookup.forecast_days > 0 {
        let forecast = client.get_forecast(&location, lookup.forecast_days).await?;
        report.push_str("\n\n");
        report.push_str(&format_forecast(&forecast));
    }

    Ok(report)
}
