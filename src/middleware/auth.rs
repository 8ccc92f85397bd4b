//! Middleware de autenticación JWT
//!
//! Resuelve el bearer token a exactamente un usuario o rechaza la request
//! antes de llegar a los handlers.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::{state::AppState, utils::errors::AppError};

/// Middleware de autenticación JWT
///
/// Inyecta `AuthenticatedUser` en las extensions de la request.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&request)
        .ok_or_else(|| AppError::Unauthorized("Authorization token required".to_string()))?;

    let user = state.auth.authenticate(token).await?;
    tracing::debug!("🔐 Request autenticada: {} ({})", user.username, user.user_id);

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
