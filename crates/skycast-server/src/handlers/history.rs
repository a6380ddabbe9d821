use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use skycast_core::AppError;
use skycast_services::{HistoryEntry, HistoryError};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// `GET /api/weather/history`
pub async fn list_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<HistoryEntry>>, ApiError> {
    let entries = state.history.list().await?;
    Ok(Json(entries))
}

/// `DELETE /api/weather/history/{id}`: remove every entry for a city id.
pub async fn delete_history(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_history_id(&raw_id).ok_or_else(|| AppError::validation("Invalid ID format"))?;

    // Storage failures on delete report the generic message
    let removed = state
        .history
        .delete_by_id(id)
        .await
        .map_err(|e| match e {
            HistoryError::NotFound(_) => ApiError::from(e),
            other => {
                tracing::error!("Failed to delete history entries for {}: {}", id, other);
                ApiError::Internal("Internal Server Error".to_string())
            }
        })?;
    tracing::info!("Removed {} history entries for city {}", removed, id);

    Ok(Json(MessageResponse {
        message: "City deleted successfully!",
    }))
}

/// Parse the leading integer of a path segment.
///
/// Leading whitespace and a sign are accepted and anything after the digits
/// is ignored, so `"42abc"` is 42. Returns `None` when no digits lead.
pub fn parse_history_id(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }

    let value: i64 = rest[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}
