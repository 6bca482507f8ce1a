//! Plain-text rendering of lookup results. Nothing here prints.

use meteo_core::{CurrentWeather, ForecastDay, ForecastSeries, Location, describe};

pub fn format_current(location: &Location, current: &CurrentWeather) -> String {
    format!(
        "— Current Weather —\n\
         Location   : {}\n\
         Latitude   : {:.4}, Longitude: {:.4}\n\
         Temperature: {:.1} °C\n\
         Windspeed  : {:.1} km/h\n\
         Condition  : {}",
        location.label(),
        location.latitude,
        location.longitude,
        current.temperature,
        current.windspeed,
        describe(current.weather_code),
    )
}

pub fn format_forecast(series: &ForecastSeries) -> String {
    let mut lines = vec!["— Daily Forecast —".to_string()];
    lines.extend(series.days().map(|day| format_day(&day)));
    lines.join("\n")
}

fn format_day(day: &ForecastDay) -> String {
    format!(
        "{} | {:<28} | min {:>5.1}°C  max {:>5.1}°C  prec {:>4.1} mm  wind {:>4.0} km/h dir {:>3.0}°",
        day.date.format("%Y-%m-%d"),
        describe(day.weather_code),
        day.temp_min,
        day.temp_max,
        day.precipitation,
        day.wind_speed_max,
        day.wind_direction,
    )
}
