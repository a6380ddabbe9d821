use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{delete_history, health, list_history, search_city};
use crate::state::AppState;

/// Full application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health))
        .nest("/api/weather", weather_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Forecast and history routes, relative to their mount point.
pub fn weather_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(search_city))
        .route("/history", get(list_history))
        .route("/history/{id}", delete(delete_history))
}
