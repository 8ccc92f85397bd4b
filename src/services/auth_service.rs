//! Servicio de autenticación
//!
//! Registro, login y refresh de tokens sobre `UserRepository`. Las passwords
//! se guardan con bcrypt.

use bcrypt::{hash, verify};
use log::{info, warn};
use std::sync::Arc;
use tokio::task;

use crate::dto::auth_dto::{LoginRequest, SignupRequest};
use crate::models::auth::{AuthenticatedUser, TokenPair, TokenType};
use crate::models::user::{NewUser, User};
use crate::repositories::{Repositories, UserRepository};
use crate::services::jwt_service::JwtService;
use crate::utils::errors::{AppError, AppResult};

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    jwt_service: JwtService,
    hash_cost: u32,
}

impl AuthService {
    pub fn new(repositories: &Repositories, jwt_service: JwtService, hash_cost: u32) -> Self {
        Self {
            users: repositories.users.clone(),
            jwt_service,
            hash_cost,
        }
    }

    /// Registrar un usuario nuevo y emitir sus tokens
    pub async fn signup(&self, request: &SignupRequest) -> AppResult<(User, TokenPair)> {
        if self.users.username_exists(&request.username).await? {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }
        if self.users.university_id_exists(&request.university_id).await? {
            return Err(AppError::Conflict("University ID already registered".to_string()));
        }

        let password_hash = hash_password(request.password.clone(), self.hash_cost).await?;

        let user = self
            .users
            .create(NewUser {
                username: request.username.clone(),
                email: request.email.clone(),
                password_hash,
                university_id: Some(request.university_id.clone()),
                phone_number: request.phone_number.clone(),
            })
            .await?;

        let tokens = self.jwt_service.issue_pair(&user)?;
        info!("✅ Usuario {} registrado (id {})", user.username, user.id);
        Ok((user, tokens))
    }

    /// Login con username y password
    pub async fn login(&self, request: &LoginRequest) -> AppResult<(User, TokenPair)> {
        let invalid = || AppError::BadRequest("Invalid credentials".to_string());

        let user = self
            .users
            .find_by_username(&request.username)
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(request.password.clone(), user.password_hash.clone()).await? {
            warn!("🔒 Login fallido para {}", request.username);
            return Err(invalid());
        }

        let tokens = self.jwt_service.issue_pair(&user)?;
        info!("🔑 Login de {}", user.username);
        Ok((user, tokens))
    }

    /// Cambiar un refresh token por un access token nuevo
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<String> {
        let claims = self.jwt_service.validate(refresh_token, TokenType::Refresh)?;
        let user = self.resolve(JwtService::user_id(&claims)?).await?;
        self.jwt_service.generate_access_token(user.user_id, &user.username)
    }

    /// Resolver un access token al usuario que lo porta
    pub async fn authenticate(&self, access_token: &str) -> AppResult<AuthenticatedUser> {
        let claims = self.jwt_service.validate(access_token, TokenType::Access)?;
        self.resolve(JwtService::user_id(&claims)?).await
    }

    async fn resolve(&self, user_id: i64) -> AppResult<AuthenticatedUser> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

        Ok(AuthenticatedUser {
            user_id: user.id,
            username: user.username,
        })
    }
}

// bcrypt es CPU intensivo: fuera de los workers de tokio
async fn hash_password(password: String, cost: u32) -> AppResult<String> {
    task::spawn_blocking(move || hash(password, cost))
        .await
        .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
        .map_err(|e| AppError::Internal(format!("Error hashing password: {}", e)))
}

async fn verify_password(password: String, password_hash: String) -> AppResult<bool> {
    task::spawn_blocking(move || verify(password, &password_hash))
        .await
        .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))?
        .map_err(|e| AppError::Internal(format!("Error verifying password: {}", e)))
}
