//! Reduce a raw 3-hour forecast to display entries.
//!
//! The first interval is always kept (it stands for "now"), followed by every
//! interval at 12:00:00, one per forecast day.

use crate::types::{ForecastEntry, ForecastInterval, ForecastResponse};

/// Time-of-day marker for the daily entries
pub const NOON: &str = "12:00:00";

/// Convert Kelvin to Fahrenheit, rounding up.
pub fn kelvin_to_fahrenheit(kelvin: f64) -> i32 {
    ((kelvin - 273.15) * 9.0 / 5.0 + 32.0).ceil() as i32
}

/// True when the time component of a `dt_txt` timestamp is exactly noon.
pub fn is_noon_interval(dt_txt: &str) -> bool {
    dt_txt
        .split_once(' ')
        .map(|(_, time)| time == NOON)
        .unwrap_or(false)
}

/// Build the display entries for a forecast.
///
/// Every entry carries the temperature of the first interval, not its own.
/// An index-0 interval that also falls on noon is emitted twice.
pub fn summarize_forecast(forecast: &ForecastResponse) -> Vec<ForecastEntry> {
    let Some(first) = forecast.list.first() else {
        return Vec::new();
    };
    let temp_f = kelvin_to_fahrenheit(first.main.temp);
    let city = forecast.city.name.as_str();

    let mut entries = Vec::new();
    for (index, interval) in forecast.list.iter().enumerate() {
        if index == 0 {
            entries.push(to_entry(city, interval, temp_f));
        }
        if is_noon_interval(&interval.dt_txt) {
            entries.push(to_entry(city, interval, temp_f));
        }
    }

    tracing::debug!(
        "Summarized {} intervals into {} entries for {}",
        forecast.list.len(),
        entries.len(),
        city
    );
    entries
}

fn to_entry(city: &str, interval: &ForecastInterval, temp_f: i32) -> ForecastEntry {
    let (icon, description) = interval
        .weather
        .first()
        .map(|c| (c.icon.clone(), c.description.clone()))
        .unwrap_or_default();

    ForecastEntry {
        city: city.to_string(),
        date: interval.dt_txt.clone(),
        icon,
        icon_description: description,
        temp_f,
        wind_speed: interval.wind.speed,
        humidity: interval.main.humidity,
    }
}
