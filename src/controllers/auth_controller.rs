use axum::{extract::State, Extension, Json};
use validator::Validate;

use crate::dto::auth_dto::{
    AuthResponse, LoginRequest, MeResponse, RefreshTokenRequest, RefreshTokenResponse, SignupRequest,
};
use crate::models::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppResult;
use crate::utils::extract::ApiJson;

/// POST /api/signup
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SignupRequest>,
) -> AppResult<Json<AuthResponse>> {
    payload.validate()?;
    let (user, tokens) = state.auth.signup(&payload).await?;
    Ok(Json(AuthResponse::new(user, tokens)))
}

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    payload.validate()?;
    let (user, tokens) = state.auth.login(&payload).await?;
    Ok(Json(AuthResponse::new(user, tokens)))
}

/// POST /api/token/refresh
pub async fn refresh_token(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RefreshTokenRequest>,
) -> AppResult<Json<RefreshTokenResponse>> {
    let access = state.auth.refresh(&payload.refresh).await?;
    Ok(Json(RefreshTokenResponse { access }))
}

/// GET /api/me
pub async fn me(Extension(user): Extension<AuthenticatedUser>) -> Json<MeResponse> {
    Json(MeResponse {
        id: user.user_id,
        username: user.username,
    })
}
