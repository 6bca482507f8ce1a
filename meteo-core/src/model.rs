use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{error::WeatherError, validate::MAX_FORECAST_DAYS};

/// A resolved place, taken from the best geocoding match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    /// First-level administrative area (state, region), when the service knows it.
    pub admin1: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub country_code: String,
}

impl Location {
    /// Display label, e.g. `"Prague, Prague (CZ)"`.
    pub fn label(&self) -> String {
        match &self.admin1 {
            Some(region) => format!("{}, {} ({})", self.name, region, self.country_code),
            None => format!("{} ({})", self.name, self.country_code),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    /// °C
    pub temperature: f64,
    /// km/h
    pub windspeed: f64,
    pub weather_code: i32,
}

/// One row of a [`ForecastSeries`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub weather_code: i32,
    pub temp_max: f64,
    pub temp_min: f64,
    pub precipitation: f64,
    pub wind_speed_max: f64,
    pub wind_direction: f64,
}

/// Daily forecast as parallel sequences, one entry per day.
///
/// Only constructible through [`ForecastSeries::new`], so every sequence is
/// guaranteed to hold exactly the requested number of days.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSeries {
    dates: Vec<NaiveDate>,
    weather_codes: Vec<i32>,
    temp_max: Vec<f64>,
    temp_min: Vec<f64>,
    precipitation: Vec<f64>,
    wind_speed_max: Vec<f64>,
    wind_direction: Vec<f64>,
}

/// Raw columns of a daily forecast before the length check.
#[derive(Debug, Clone, Default)]
pub struct ForecastColumns {
    pub dates: Vec<NaiveDate>,
    pub weather_codes: Vec<i32>,
    pub temp_max: Vec<f64>,
    pub temp_min: Vec<f64>,
    pub precipitation: Vec<f64>,
    pub wind_speed_max: Vec<f64>,
    pub wind_direction: Vec<f64>,
}

impl ForecastSeries {
    /// Checks that `days` is within `1..=16` and every column holds exactly
    /// that many entries.
    pub fn new(columns: ForecastColumns, days: usize) -> Result<Self, WeatherError> {
        if !(1..=usize::from(MAX_FORECAST_DAYS)).contains(&days) {
            return Err(WeatherError::malformed(format!(
                "A daily forecast covers 1 to {MAX_FORECAST_DAYS} days, not {days}."
            )));
        }

        let lengths = [
            ("time", columns.dates.len()),
            ("weathercode", columns.weather_codes.len()),
            ("temperature_2m_max", columns.temp_max.len()),
            ("temperature_2m_min", columns.temp_min.len()),
            ("precipitation_sum", columns.precipitation.len()),
            ("windspeed_10m_max", columns.wind_speed_max.len()),
            ("winddirection_10m_dominant", columns.wind_direction.len()),
        ];

        if let Some((field, len)) = lengths.iter().find(|(_, len)| *len != days) {
            return Err(WeatherError::malformed(format!(
                "Inconsistent daily forecast: '{field}' has {len} entries, expected {days}."
            )));
        }

        Ok(Self {
            dates: columns.dates,
            weather_codes: columns.weather_codes,
            temp_max: columns.temp_max,
            temp_min: columns.temp_min,
            precipitation: columns.precipitation,
            wind_speed_max: columns.wind_speed_max,
            wind_direction: columns.wind_direction,
        })
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn weather_codes(&self) -> &[i32] {
        &self.weather_codes
    }

    pub fn temp_max(&self) -> &[f64] {
        &self.temp_max
    }

    pub fn temp_min(&self) -> &[f64] {
        &self.temp_min
    }

    pub fn precipitation(&self) -> &[f64] {
        &self.precipitation
    }

    pub fn wind_speed_max(&self) -> &[f64] {
        &self.wind_speed_max
    }

    pub fn wind_direction(&self) -> &[f64] {
        &self.wind_direction
    }

    /// Day-by-day view over the columns.
    pub fn days(&self) -> impl Iterator<Item = ForecastDay> + '_ {
        (0..self.len()).map(move |i| ForecastDay {
            date: self.dates[i],
            weather_code: self.weather_codes[i],
            temp_max: self.temp_max[i],
            temp_min: self.temp_min[i],
            precipitation: self.precipitation[i],
            wind_speed_max: self.wind_speed_max[i],
            wind_direction: self.wind_direction[i],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(days: usize) -> ForecastColumns {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date");
        ForecastColumns {
            dates: (0..days).map(|i| start + chrono::Days::new(i as u64)).collect(),
            weather_codes: vec![3; days],
            temp_max: vec![10.0; days],
            temp_min: vec![2.0; days],
            precipitation: vec![0.5; days],
            wind_speed_max: vec![20.0; days],
            wind_direction: vec![180.0; days],
        }
    }

    #[test]
    fn label_with_and_without_region() {
        let mut loc = Location {
            name: "Prague".into(),
            admin1: Some("Prague".into()),
            latitude: 50.088,
            longitude: 14.4208,
            country_code: "CZ".into(),
        };
        assert_eq!(loc.label(), "Prague, Prague (CZ)");

        loc.admin1 = None;
        assert_eq!(loc.label(), "Prague (CZ)");
    }

    #[test]
    fn series_accepts_matching_lengths() {
        let series = ForecastSeries::new(columns(3), 3).expect("consistent columns");
        assert_eq!(series.len(), 3);
        assert_eq!(series.temp_max().len(), 3);
        assert_eq!(series.days().count(), 3);

        let last = series.days().last().expect("three days");
        assert_eq!(last.date, NaiveDate::from_ymd_opt(2025, 1, 3).unwrap());
    }

    #[test]
    fn series_rejects_short_column() {
        let mut cols = columns(3);
        cols.temp_max.pop();

        let err = ForecastSeries::new(cols, 3).unwrap_err();
        assert!(matches!(err, WeatherError::MalformedData(_)));
        assert!(err.to_string().contains("temperature_2m_max"));
    }

    #[test]
    fn series_rejects_empty_or_oversized_horizon() {
        for days in [0, 17] {
            let err = ForecastSeries::new(columns(days), days).unwrap_err();
            assert!(matches!(err, WeatherError::MalformedData(_)), "{days}");
        }
    }

    #[test]
    fn series_rejects_wrong_day_count() {
        let err = ForecastSeries::new(columns(2), 3).unwrap_err();
        assert!(matches!(err, WeatherError::MalformedData(_)));
    }
}
