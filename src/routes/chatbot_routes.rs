use axum::{routing::post, Router};

use crate::controllers::chatbot_controller::ask;
use crate::state::AppState;

pub fn chatbot_routes() -> Router<AppState> {
    Router::new().route("/chatbot", post(ask))
}
