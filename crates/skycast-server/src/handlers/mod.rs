mod health;
mod history;
mod weather;

pub use health::{health, HealthResponse};
pub use history::{delete_history, list_history, parse_history_id, MessageResponse};
pub use weather::{search_city, CityRequest};
