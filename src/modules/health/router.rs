use axum::{Router, routing::get};

use super::controller::health;
use crate::state::AppState;

pub fn init_health_router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
