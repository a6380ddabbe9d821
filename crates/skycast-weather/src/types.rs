use serde::{Deserialize, Serialize};

/// One match from the OpenWeather direct geocoding endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeResult {
    #[serde(default)]
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

/// Geographic coordinates used for the forecast lookup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl From<&GeocodeResult> for Coordinates {
    fn from(g: &GeocodeResult) -> Self {
        Self { lat: g.lat, lon: g.lon }
    }
}

/// 5 day / 3 hour forecast payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub list: Vec<ForecastInterval>,
    pub city: CityInfo,
}

/// City block of the forecast payload; `id` is what history records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityInfo {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    /// Shift in seconds from UTC
    #[serde(default)]
    pub timezone: Option<i64>,
}

/// A single 3-hour forecast record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastInterval {
    /// Unix timestamp of the forecasted time
    pub dt: i64,
    /// "YYYY-MM-DD HH:MM:SS"
    pub dt_txt: String,
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<Condition>,
    pub wind: Wind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MainReadings {
    /// Kelvin (no `units` parameter is sent upstream)
    pub temp: f64,
    #[serde(default)]
    pub feels_like: Option<f64>,
    pub humidity: u8,
    #[serde(default)]
    pub pressure: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Condition {
    pub id: i32,
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
    #[serde(default)]
    pub deg: Option<f64>,
}

/// Display entry derived from a forecast interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastEntry {
    pub city: String,
    pub date: String,
    pub icon: String,
    pub icon_description: String,
    pub temp_f: i32,
    pub wind_speed: f64,
    pub humidity: u8,
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("No geocoding match for city: {0}")]
    LocationNotFound(String),
    #[error("Forecast unavailable (status {status}) for {lat},{lon}")]
    ForecastNotFound { status: u16, lat: f64, lon: f64 },
    #[error("Upstream rejected the API key")]
    InvalidApiKey,
    #[error("Upstream error: {status} - {message}")]
    Upstream { status: u16, message: String },
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_forecast_response_ignores_unknown_fields() {
        let json = serde_json::json!({
            "cod": "200",
            "cnt": 1,
            "list": [{
                "dt": 1704067200,
                "dt_txt": "2024-01-01 00:00:00",
                "main": {"temp": 280.15, "humidity": 81, "temp_kf": 0.0},
                "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01n"}],
                "wind": {"speed": 3.6, "deg": 220, "gust": 7.1},
                "visibility": 10000
            }],
            "city": {"id": 2988507, "name": "Paris", "country": "FR", "timezone": 3600, "population": 0}
        });

        let forecast: ForecastResponse = serde_json::from_value(json).unwrap();
        assert_eq!(forecast.city.id, 2988507);
        assert_eq!(forecast.list.len(), 1);
        assert_eq!(forecast.list[0].weather[0].icon, "01n");
        assert_eq!(forecast.list[0].wind.deg, Some(220.0));
    }

    #[test]
    fn test_forecast_entry_uses_camel_case() {
        let entry = ForecastEntry {
            city: "Paris".to_string(),
            date: "2024-01-01 12:00:00".to_string(),
            icon: "01d".to_string(),
            icon_description: "clear sky".to_string(),
            temp_f: 45,
            wind_speed: 3.6,
            humidity: 81,
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["iconDescription"], "clear sky");
        assert_eq!(json["tempF"], 45);
        assert_eq!(json["windSpeed"], 3.6);
    }

    #[test]
    fn test_geocode_to_coordinates() {
        let g: GeocodeResult =
            serde_json::from_str(r#"{"name":"Paris","lat":48.85,"lon":2.35,"country":"FR"}"#)
                .unwrap();
        assert_eq!(Coordinates::from(&g), Coordinates { lat: 48.85, lon: 2.35 });
    }
}
