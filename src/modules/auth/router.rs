use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{login_user, protected, register_user};
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_user))
        .route("/login", post(login_user))
        .route("/protected", get(protected))
}
