use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::auth::TokenPair;
use crate::models::user::User;
use crate::utils::validation::validate_not_blank;

/// Request de registro
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 3, max = 150))]
    pub username: String,

    #[validate(email, length(max = 254))]
    pub email: String,

    #[validate(length(min = 8))]
    pub password: String,

    #[validate(custom = "validate_not_blank", length(max = 50))]
    pub university_id: String,

    #[validate(length(max = 15))]
    pub phone_number: Option<String>,
}

/// Request de login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Response de signup y login
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access: String,
    pub refresh: String,
    pub username: String,
    pub university_id: Option<String>,
    pub phone_number: Option<String>,
}

impl AuthResponse {
    pub fn new(user: User, tokens: TokenPair) -> Self {
        Self {
            access: tokens.access,
            refresh: tokens.refresh,
            username: user.username,
            university_id: user.university_id,
            phone_number: user.phone_number,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshTokenResponse {
    pub access: String,
}

/// Response de /me
#[derive(Debug, Serialize, Deserialize)]
pub struct MeResponse {
    pub id: i64,
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, email: &str, password: &str, university_id: &str) -> SignupRequest {
        SignupRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            university_id: university_id.to_string(),
            phone_number: None,
        }
    }

    #[test]
    fn test_signup_validation() {
        assert!(request("asha", "asha@campus.edu", "longenough", "U-1").validate().is_ok());
        assert!(request("as", "asha@campus.edu", "longenough", "U-1").validate().is_err());
        assert!(request("asha", "not-an-email", "longenough", "U-1").validate().is_err());
        assert!(request("asha", "asha@campus.edu", "short", "U-1").validate().is_err());
        assert!(request("asha", "asha@campus.edu", "longenough", "  ").validate().is_err());
    }
}
