use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use skycast_core::{AppError, ConfigError};
use skycast_services::HistoryEntry;
use skycast_weather::ForecastEntry;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CityRequest {
    #[serde(default)]
    pub city: Option<String>,
}

/// `POST /api/weather`: look up a city, record it in history and return
/// the summarized forecast.
pub async fn search_city(
    State(state): State<AppState>,
    payload: Result<Json<CityRequest>, JsonRejection>,
) -> Result<Json<Vec<ForecastEntry>>, ApiError> {
    let city = match payload {
        Ok(Json(body)) => body.city,
        Err(rejection) => {
            tracing::debug!("Unreadable request body: {}", rejection.body_text());
            None
        }
    };
    let city = city
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::validation("City name is required!"))?;

    let provider = state.weather.as_ref().ok_or_else(|| {
        AppError::Config(ConfigError::MissingSetting("weather.api_key".to_string()))
    })?;

    let forecast = provider.forecast_for_city(&city).await?;
    tracing::info!(
        "Forecast for {} resolved to {} ({}), {} entries",
        city,
        forecast.city_name,
        forecast.city_id,
        forecast.entries.len()
    );

    state
        .history
        .append(HistoryEntry::new(forecast.city_name, forecast.city_id))
        .await?;

    Ok(Json(forecast.entries))
}
