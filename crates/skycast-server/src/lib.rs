//! SkyCast HTTP server.
//!
//! Exposes the forecast lookup and search history operations under
//! `/api/weather`, plus a liveness probe at `/healthz`.

pub mod error;
pub mod error_mapping;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{build_router, weather_routes};
pub use state::AppState;
