//! Rutas de la API
//!
//! Todo cuelga de `/api`. Solo signup, login y refresh son públicas; el
//! resto pasa por `auth_middleware`.

pub mod auth_routes;
pub mod chatbot_routes;
pub mod ride_routes;
pub mod vehicle_routes;

use axum::{middleware, response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::middleware::{auth_middleware, cors_layer};
use crate::state::AppState;

use auth_routes::{auth_routes, public_auth_routes};
use chatbot_routes::chatbot_routes;
use ride_routes::ride_routes;
use vehicle_routes::vehicle_routes;

/// Construye el router completo de la aplicación
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .merge(auth_routes())
        .merge(ride_routes())
        .merge(vehicle_routes())
        .merge(chatbot_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let api = Router::new().merge(public_auth_routes()).merge(protected);

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "unipool-backend",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
