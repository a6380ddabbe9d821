//! HTTP error envelope.
//!
//! Every failure is reported as `{ "error": "<message>" }` with a status
//! picked from the error class.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use skycast_core::AppError;

use crate::error_mapping::IntoAppError;

#[derive(Debug)]
pub enum ApiError {
    InvalidRequest(String),
    NotFound(String),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::InvalidRequest(message) | Self::NotFound(message) | Self::Internal(message) => {
                message
            }
        }
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        match error {
            AppError::Validation(message) => Self::InvalidRequest(message),
            error if error.is_not_found() => {
                tracing::info!("Not found: {}", error);
                Self::NotFound(error.user_message().to_string())
            }
            error => {
                tracing::error!("Request failed: {}", error);
                Self::Internal(error.user_message().to_string())
            }
        }
    }
}

impl From<skycast_weather::WeatherError> for ApiError {
    fn from(error: skycast_weather::WeatherError) -> Self {
        error.into_app_error().into()
    }
}

impl From<skycast_services::HistoryError> for ApiError {
    fn from(error: skycast_services::HistoryError) -> Self {
        error.into_app_error().into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(serde_json::json!({
                "error": self.message(),
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skycast_core::{ConfigError, StorageError, WeatherError};

    #[test]
    fn test_validation_keeps_message() {
        let error = ApiError::from(AppError::validation("City name is required!"));
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error.message(), "City name is required!");
    }

    #[test]
    fn test_not_found_classes() {
        let city = ApiError::from(AppError::Weather(WeatherError::LocationNotFound(
            "Atlantis".into(),
        )));
        assert_eq!(city.status(), StatusCode::NOT_FOUND);
        assert_eq!(city.message(), "City not found!");

        let entry = ApiError::from(AppError::Storage(StorageError::NotFound(5)));
        assert_eq!(entry.status(), StatusCode::NOT_FOUND);
        assert_eq!(entry.message(), "City not found in history");
    }

    #[test]
    fn test_internal_classes() {
        let key = ApiError::from(AppError::Config(ConfigError::MissingSetting(
            "weather.api_key".into(),
        )));
        assert_eq!(key.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(key.message(), "API Key is missing in configuration!");

        let other = ApiError::from(AppError::Other(anyhow::anyhow!("boom")));
        assert_eq!(other.message(), "Internal Server Error");
    }
}
