//! Weather service for SkyCast
//!
//! Resolves city names through OpenWeather geocoding, fetches the 5 day /
//! 3 hour forecast and reduces it to display entries.

pub mod geocode;
pub mod provider;
pub mod transform;
pub mod types;

pub use geocode::direct_geocode;
pub use provider::{CityForecast, Endpoints, WeatherProvider};
pub use transform::{kelvin_to_fahrenheit, summarize_forecast};
pub use types::*;
