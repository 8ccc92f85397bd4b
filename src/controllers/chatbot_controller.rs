use axum::{
    extract::State,
    Json,
};

use crate::dto::chatbot_dto::{ChatbotQuery, ChatbotResponse};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::extract::ApiQuery;

/// POST /api/chatbot?query=...
pub async fn ask(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ChatbotQuery>,
) -> AppResult<Json<ChatbotResponse>> {
    if params.query.trim().is_empty() {
        return Err(AppError::Validation("query must not be blank".to_string()));
    }

    let answer = state.chatbot.ask(&params.query).await?;
    Ok(Json(ChatbotResponse {
        query: params.query,
        answer,
    }))
}
