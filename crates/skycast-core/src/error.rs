//! Centralized error types for SkyCast.
//!
//! This module provides a typed error hierarchy that:
//! - Lets the HTTP layer pick a status code per failure class
//! - Provides user-facing messages suitable for response bodies
//! - Preserves full error context for logging

use thiserror::Error;

/// Top-level application error type.
///
/// Service crate errors are mapped into this type at the HTTP edge.
/// Use `user_message()` to get a client-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad or missing request input
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Weather service error: {0}")]
    Weather(#[from] WeatherError),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Returns a user-facing message suitable for an error response body.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "Invalid request.",
            AppError::Network(e) => e.user_message(),
            AppError::Storage(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Weather(e) => e.user_message(),
            AppError::Other(_) => "Internal Server Error",
        }
    }

    /// True when the failure means the requested resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AppError::Weather(WeatherError::LocationNotFound(_))
                | AppError::Weather(WeatherError::ForecastNotFound(_))
                | AppError::Storage(StorageError::NotFound(_))
        )
    }
}

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    /// Upstream transport failures are never detailed to the client.
    pub fn user_message(&self) -> &'static str {
        "Internal Server Error"
    }
}

/// History storage errors (JSON file, SQLite, memory).
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("History entry not found: {0}")]
    NotFound(i64),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Data corruption detected: {0}")]
    Corruption(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),
}

impl StorageError {
    pub fn user_message(&self) -> &'static str {
        match self {
            StorageError::NotFound(_) => "City not found in history",
            StorageError::ReadFailed(_) | StorageError::Corruption(_) => {
                "Failed to load search history"
            }
            StorageError::WriteFailed(_) | StorageError::QueryFailed(_) => {
                "Internal Server Error"
            }
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    MissingSetting(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::MissingSetting(_) => "API Key is missing in configuration!",
        }
    }
}

/// Weather lookup errors.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Location not found: {0}")]
    LocationNotFound(String),

    #[error("Forecast not found: {0}")]
    ForecastNotFound(String),

    #[error("Weather API error: {0}")]
    ApiError(String),

    #[error("Invalid API key")]
    InvalidApiKey,
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::LocationNotFound(_) | WeatherError::ForecastNotFound(_) => {
                "City not found!"
            }
            WeatherError::ApiError(_) | WeatherError::InvalidApiKey => "Internal Server Error",
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_decode() {
            NetworkError::InvalidResponse(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}

/// Extension trait for converting rusqlite errors to our error types.
pub trait RusqliteErrorExt {
    fn into_storage_error(self) -> StorageError;
}

impl RusqliteErrorExt for rusqlite::Error {
    fn into_storage_error(self) -> StorageError {
        match &self {
            rusqlite::Error::SqliteFailure(_, Some(msg)) if msg.contains("corrupt") => {
                StorageError::Corruption(self.to_string())
            }
            _ => StorageError::QueryFailed(self.to_string()),
        }
    }
}
