//! Input checks shared by the command-line flags and the interactive prompts.

use std::time::Duration;

use crate::error::WeatherError;

/// Largest forecast horizon the free Open-Meteo API serves.
pub const MAX_FORECAST_DAYS: u8 = 16;

/// Accepts a day count in `0..=16`. Zero means "current weather only".
pub fn validate_forecast_days(days: i64) -> Result<u8, WeatherError> {
    if (0..=i64::from(MAX_FORECAST_DAYS)).contains(&days) {
        Ok(days as u8)
    } else {
        Err(WeatherError::validation(format!(
            "Forecast days must be an integer between 0 and {MAX_FORECAST_DAYS}, got {days}."
        )))
    }
}

/// Parses raw text (a flag value or prompt answer) into a day count.
pub fn parse_forecast_days(raw: &str) -> Result<u8, WeatherError> {
    let trimmed = raw.trim();
    let days: i64 = trimmed.parse().map_err(|_| {
        WeatherError::validation(format!(
            "Forecast days must be an integer between 0 and {MAX_FORECAST_DAYS}, got '{trimmed}'."
        ))
    })?;

    validate_forecast_days(days)
}

pub fn validate_city(raw: &str) -> Result<String, WeatherError> {
    let city = raw.trim();
    if city.is_empty() {
        return Err(WeatherError::validation("No city entered."));
    }

    Ok(city.to_string())
}

/// Per-request timeout in seconds; must be a positive, finite number.
pub fn validate_timeout(secs: f64) -> Result<Duration, WeatherError> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(WeatherError::validation(format!(
            "Timeout must be a positive number of seconds, got {secs}."
        )));
    }

    Duration::try_from_secs_f64(secs)
        .map_err(|e| WeatherError::validation(format!("Invalid timeout {secs}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_full_range() {
        for days in 0..=16 {
            assert_eq!(validate_forecast_days(days).expect("in range"), days as u8);
        }
    }

    #[test]
    fn rejects_out_of_range() {
        for days in [-1, 17, 20, 255, 256, i64::MAX, i64::MIN] {
            let err = validate_forecast_days(days).unwrap_err();
            assert!(matches!(err, WeatherError::Validation(_)), "{days}");
        }
    }

    #[test]
    fn parses_text() {
        assert_eq!(parse_forecast_days("3").unwrap(), 3);
        assert_eq!(parse_forecast_days("  16 ").unwrap(), 16);
        assert_eq!(parse_forecast_days("0").unwrap(), 0);
    }

    #[test]
    fn rejects_non_numeric_text() {
        for raw in ["", "abc", "3.5", "five", "1e2"] {
            let err = parse_forecast_days(raw).unwrap_err();
            assert!(matches!(err, WeatherError::Validation(_)), "{raw:?}");
        }
    }

    #[test]
    fn twenty_is_rejected_with_range_message() {
        let err = parse_forecast_days("20").unwrap_err();
        assert!(err.to_string().contains("between 0 and 16"));
    }

    #[test]
    fn city_is_trimmed() {
        assert_eq!(validate_city("  Brno \n").unwrap(), "Brno");
    }

    #[test]
    fn blank_city_is_rejected() {
        assert!(matches!(validate_city("   ").unwrap_err(), WeatherError::Validation(_)));
    }

    #[test]
    fn timeout_must_be_positive() {
        assert_eq!(validate_timeout(7.0).unwrap(), Duration::from_secs(7));
        assert_eq!(validate_timeout(0.5).unwrap(), Duration::from_millis(500));
        for secs in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(validate_timeout(secs).is_err(), "{secs}");
        }
    }
}
