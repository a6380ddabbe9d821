use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use skycast_core::{Config, HistoryBackendKind, HistoryConfig};
use skycast_services::{
    HistoryClient, InMemoryHistoryStore, JsonFileHistoryStore, SqliteHistoryStore,
};
use skycast_weather::{Endpoints, WeatherProvider};

/// Shared state handed to every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Arc<Config>,
    pub history: HistoryClient,
    /// `None` when no API key is configured; lookups then fail per request.
    pub weather: Option<WeatherProvider>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: Config, history: HistoryClient, weather: Option<WeatherProvider>) -> Self {
        Self {
            config: Arc::new(config),
            history,
            weather,
            started_at: Utc::now(),
        }
    }

    /// Build the history client and weather provider described by `config`.
    pub fn from_config(config: Config) -> Result<Self> {
        let history = open_history(&config.history)?;
        tracing::info!(
            "Search history: {} backend at {}",
            history.backend_name(),
            config.history.path.display()
        );

        let weather = match config.weather.api_key() {
            Some(key) => {
                let endpoints = Endpoints {
                    geocode_url: config.weather.geocode_url.clone(),
                    forecast_url: config.weather.forecast_url.clone(),
                };
                let timeout = Duration::from_secs(config.weather.request_timeout_secs);
                let provider = WeatherProvider::with_endpoints(key, endpoints, timeout)
                    .context("Failed to build weather client")?;
                Some(provider)
            }
            None => {
                tracing::warn!("No OpenWeather API key configured; city lookups will fail");
                None
            }
        };

        Ok(Self::new(config, history, weather))
    }
}

fn open_history(config: &HistoryConfig) -> Result<HistoryClient> {
    let client = match config.backend {
        HistoryBackendKind::Json => HistoryClient::json(JsonFileHistoryStore::new(&config.path)),
        HistoryBackendKind::Sqlite => {
            let store = SqliteHistoryStore::new(&config.path).with_context(|| {
                format!("Failed to open history database {}", config.path.display())
            })?;
            HistoryClient::sqlite(store)
        }
        HistoryBackendKind::Memory => HistoryClient::memory(InMemoryHistoryStore::new()),
    };
    Ok(client)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_from_config_without_key_has_no_provider() {
        let mut config = Config::default();
        config.history.backend = HistoryBackendKind::Memory;

        let state = AppState::from_config(config).unwrap();
        assert!(state.weather.is_none());
        assert_eq!(state.history.backend_name(), "memory");
    }

    #[test]
    fn test_from_config_blank_key_has_no_provider() {
        let mut config = Config::default();
        config.history.backend = HistoryBackendKind::Memory;
        config.weather.api_key = Some("   ".to_string());

        assert!(AppState::from_config(config).unwrap().weather.is_none());
    }

    #[test]
    fn test_from_config_sqlite_backend() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.history.backend = HistoryBackendKind::Sqlite;
        config.history.path = dir.path().join("history.db");
        config.weather.api_key = Some("key".to_string());

        let state = AppState::from_config(config).unwrap();
        assert_eq!(state.history.backend_name(), "sqlite");
        assert!(state.weather.is_some());
    }
}
