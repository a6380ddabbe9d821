//! Conversions from service crate errors into `AppError`.

use skycast_core::error::{ReqwestErrorExt, RusqliteErrorExt};
use skycast_core::{AppError, StorageError, WeatherError};
use skycast_services::HistoryError;

/// Extension trait for lifting crate-local errors into the shared hierarchy.
pub trait IntoAppError {
    fn into_app_error(self) -> AppError;
}

impl IntoAppError for skycast_weather::WeatherError {
    fn into_app_error(self) -> AppError {
        use skycast_weather::WeatherError as Upstream;

        match self {
            Upstream::Network(e) => AppError::Network(e.into_network_error()),
            Upstream::LocationNotFound(city) => {
                AppError::Weather(WeatherError::LocationNotFound(city))
            }
            Upstream::ForecastNotFound { status, lat, lon } => AppError::Weather(
                WeatherError::ForecastNotFound(format!("status {} at {},{}", status, lat, lon)),
            ),
            Upstream::InvalidApiKey => AppError::Weather(WeatherError::InvalidApiKey),
            Upstream::Upstream { status, message } => {
                AppError::Weather(WeatherError::ApiError(format!("{} - {}", status, message)))
            }
        }
    }
}

impl IntoAppError for HistoryError {
    fn into_app_error(self) -> AppError {
        match self {
            HistoryError::NotFound(id) => AppError::Storage(StorageError::NotFound(id)),
            HistoryError::Corrupt(msg) => AppError::Storage(StorageError::Corruption(msg)),
            HistoryError::Read(msg) => AppError::Storage(StorageError::ReadFailed(msg)),
            HistoryError::Write(msg) => AppError::Storage(StorageError::WriteFailed(msg)),
            HistoryError::Database(e) => AppError::Storage(e.into_storage_error()),
            HistoryError::Other(e) => AppError::Other(e),
        }
    }
}
