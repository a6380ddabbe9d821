use crate::geocode::direct_geocode;
use crate::transform::summarize_forecast;
use crate::types::{Coordinates, ForecastEntry, ForecastResponse, WeatherError};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

pub const GEOCODE_URL: &str = "http://api.openweathermap.org/geo/1.0/direct";
pub const FORECAST_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Upstream endpoints; overridable for tests and proxies
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub geocode_url: String,
    pub forecast_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            geocode_url: GEOCODE_URL.to_string(),
            forecast_url: FORECAST_URL.to_string(),
        }
    }
}

/// Result of a city lookup: the display entries plus the city identity
/// that gets recorded in search history.
#[derive(Debug, Clone)]
pub struct CityForecast {
    pub city_id: i64,
    pub city_name: String,
    pub entries: Vec<ForecastEntry>,
}

/// OpenWeather client: geocoding followed by the 5 day / 3 hour forecast
#[derive(Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    api_key: String,
    endpoints: Endpoints,
}

impl std::fmt::Debug for WeatherProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherProvider")
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

impl WeatherProvider {
    pub fn new(api_key: impl Into<String>) -> Result<Self, WeatherError> {
        Self::with_endpoints(
            api_key,
            Endpoints::default(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    pub fn with_endpoints(
        api_key: impl Into<String>,
        endpoints: Endpoints,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client: Arc::new(client),
            api_key: api_key.into(),
            endpoints,
        })
    }

    /// Resolve a city name to coordinates.
    #[instrument(skip(self), level = "info")]
    pub async fn geocode(&self, city: &str) -> Result<Coordinates, WeatherError> {
        let result =
            direct_geocode(&self.client, &self.endpoints.geocode_url, &self.api_key, city).await?;
        Ok(Coordinates::from(&result))
    }

    /// Fetch the raw forecast for a coordinate pair.
    ///
    /// Any non-success status is reported as `ForecastNotFound`.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_forecast(&self, coords: Coordinates) -> Result<ForecastResponse, WeatherError> {
        let lat = coords.lat.to_string();
        let lon = coords.lon.to_string();
        let response = self
            .client
            .get(&self.endpoints.forecast_url)
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Forecast returned status {} for {}, {}", status, lat, lon);
            return Err(WeatherError::ForecastNotFound {
                status: status.as_u16(),
                lat: coords.lat,
                lon: coords.lon,
            });
        }

        let forecast: ForecastResponse = response.json().await?;
        tracing::debug!(
            "Fetched {} forecast intervals for {}",
            forecast.list.len(),
            forecast.city.name
        );
        Ok(forecast)
    }

    /// Geocode, fetch and summarize in one call.
    pub async fn forecast_for_city(&self, city: &str) -> Result<CityForecast, WeatherError> {
        let coords = self.geocode(city).await?;
        let forecast = self.fetch_forecast(coords).await?;
        let entries = summarize_forecast(&forecast);

        Ok(CityForecast {
            city_id: forecast.city.id,
            city_name: forecast.city.name,
            entries,
        })
    }
}
