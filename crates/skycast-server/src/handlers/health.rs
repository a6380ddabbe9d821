use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: DateTime<Utc>,
    uptime_seconds: i64,
    history_backend: &'static str,
    history_path: String,
    /// `None` when the history cannot be read.
    history_entries: Option<usize>,
    weather_configured: bool,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let history_entries = match state.history.count().await {
        Ok(count) => Some(count),
        Err(e) => {
            tracing::warn!("Health check could not count history: {}", e);
            None
        }
    };

    let now = Utc::now();
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: now,
        uptime_seconds: (now - state.started_at).num_seconds(),
        history_backend: state.history.backend_name(),
        history_path: state.config.history.path.display().to_string(),
        history_entries,
        weather_configured: state.weather.is_some(),
    })
}
