use axum::{
    routing::{get, post},
    Router,
};

use crate::controllers::auth_controller::{login, me, refresh_token, signup};
use crate::state::AppState;

/// Rutas de autenticación sin token
pub fn public_auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/token/refresh", post(refresh_token))
}

/// Rutas de identidad que requieren token
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/me", get(me))
}
