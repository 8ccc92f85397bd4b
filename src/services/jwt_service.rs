use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::config::environment::EnvironmentConfig;
use crate::models::auth::{JwtClaims, TokenPair, TokenType};
use crate::models::user::User;
use crate::utils::errors::{AppError, AppResult};

/// Configuración JWT
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub algorithm: Algorithm,
    pub access_token_duration: Duration,
    pub refresh_token_duration: Duration,
}

impl From<&EnvironmentConfig> for JwtConfig {
    fn from(config: &EnvironmentConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            algorithm: Algorithm::HS256,
            access_token_duration: Duration::minutes(config.jwt_access_ttl_minutes),
            refresh_token_duration: Duration::days(config.jwt_refresh_ttl_days),
        }
    }
}

/// Servicio JWT
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_ref());
        let decoding_key = DecodingKey::from_secret(config.secret.as_ref());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Genera el par access + refresh para un usuario
    pub fn issue_pair(&self, user: &User) -> AppResult<TokenPair> {
        Ok(TokenPair {
            access: self.generate(user.id, &user.username, TokenType::Access)?,
            refresh: self.generate(user.id, &user.username, TokenType::Refresh)?,
        })
    }

    /// Genera un token de acceso
    pub fn generate_access_token(&self, user_id: i64, username: &str) -> AppResult<String> {
        self.generate(user_id, username, TokenType::Access)
    }

    fn generate(&self, user_id: i64, username: &str, token_type: TokenType) -> AppResult<String> {
        let now = Utc::now();
        let lifetime = match token_type {
            TokenType::Access => self.config.access_token_duration,
            TokenType::Refresh => self.config.refresh_token_duration,
        };

        let claims = JwtClaims {
            sub: user_id.to_string(),
            username: username.to_string(),
            token_type,
            jti: Uuid::new_v4().to_string(),
            exp: (now + lifetime).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(self.config.algorithm), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Error generating token: {}", e)))
    }

    /// Valida un token y comprueba que sea del tipo esperado
    pub fn validate(&self, token: &str, expected: TokenType) -> AppResult<JwtClaims> {
        let validation = Validation::new(self.config.algorithm);

        let claims = decode::<JwtClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))?;

        if claims.token_type != expected {
            return Err(AppError::Unauthorized("Invalid token type".to_string()));
        }

        Ok(claims)
    }

    /// Extrae el user_id de unos claims ya validados
    pub fn user_id(claims: &JwtClaims) -> AppResult<i64> {
        claims
            .sub
            .parse::<i64>()
            .map_err(|_| AppError::Unauthorized("Invalid token subject".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new(JwtConfig::from(&EnvironmentConfig::for_tests()))
    }

    fn user() -> User {
        User {
            id: 42,
            username: "asha".to_string(),
            email: "asha@campus.edu".to_string(),
            password_hash: String::new(),
            university_id: Some("U-42".to_string()),
            phone_number: None,
            is_verified: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_generate_and_validate_token() {
        let jwt_service = service();
        let pair = jwt_service.issue_pair(&user()).unwrap();

        let claims = jwt_service.validate(&pair.access, TokenType::Access).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.username, "asha");
        assert_eq!(JwtService::user_id(&claims).unwrap(), 42);
    }

    #[test]
    fn test_refresh_token_is_not_an_access_token() {
        let jwt_service = service();
        let pair = jwt_service.issue_pair(&user()).unwrap();

        assert!(jwt_service.validate(&pair.refresh, TokenType::Access).is_err());
        assert!(jwt_service.validate(&pair.refresh, TokenType::Refresh).is_ok());
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let mut other_config = EnvironmentConfig::for_tests();
        other_config.jwt_secret = "another-secret".to_string();
        let other = JwtService::new(JwtConfig::from(&other_config));

        let token = other.generate_access_token(1, "mallory").unwrap();
        let result = service().validate(&token, TokenType::Access);
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let mut config = JwtConfig::from(&EnvironmentConfig::for_tests());
        config.access_token_duration = Duration::minutes(-10);
        let jwt_service = JwtService::new(config);

        let token = jwt_service.generate_access_token(1, "late").unwrap();
        assert!(jwt_service.validate(&token, TokenType::Access).is_err());
    }
}
