//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use anyhow::{anyhow, Context, Result};
use std::env;
use std::str::FromStr;

const DEV_JWT_SECRET: &str = "unipool-dev-secret-change-in-production";

/// Motor de almacenamiento elegido al arrancar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" | "in-memory" => Ok(StorageBackend::Memory),
            other => Err(anyhow!("STORAGE_BACKEND desconocido: '{}'", other)),
        }
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub storage_backend: StorageBackend,
    pub jwt_secret: String,
    pub jwt_access_ttl_minutes: i64,
    pub jwt_refresh_ttl_days: i64,
    pub bcrypt_cost: u32,
    pub cors_origins: Vec<String>,
    // Chatbot (Gemini)
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub chatbot_timeout_secs: u64,
}

impl EnvironmentConfig {
    /// Cargar la configuración desde variables de entorno
    pub fn from_env() -> Result<Self> {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ if environment == "production" => {
                return Err(anyhow!("JWT_SECRET must be set in production"));
            }
            _ => DEV_JWT_SECRET.to_string(),
        };

        Ok(Self {
            port: parse_var("PORT", 8000)?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            storage_backend: parse_var("STORAGE_BACKEND", StorageBackend::Postgres)?,
            jwt_secret,
            jwt_access_ttl_minutes: parse_var("JWT_ACCESS_TTL_MINUTES", 60)?,
            jwt_refresh_ttl_days: parse_var("JWT_REFRESH_TTL_DAYS", 7)?,
            bcrypt_cost: parse_var("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| split_origins(&origins))
                .unwrap_or_default(),
            gemini_api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.trim().is_empty()),
            gemini_model: env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-1.5-flash".to_string()),
            gemini_base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".to_string()),
            chatbot_timeout_secs: parse_var("CHATBOT_TIMEOUT_SECS", 20)?,
            environment,
        })
    }

    /// Configuración para tests: almacenamiento en memoria y sin chatbot
    pub fn for_tests() -> Self {
        Self {
            environment: "test".to_string(),
            port: 0,
            host: "127.0.0.1".to_string(),
            storage_backend: StorageBackend::Memory,
            jwt_secret: "test-secret".to_string(),
            jwt_access_ttl_minutes: 60,
            jwt_refresh_ttl_days: 7,
            bcrypt_cost: 4,
            cors_origins: Vec::new(),
            gemini_api_key: None,
            gemini_model: "gemini-1.5-flash".to_string(),
            gemini_base_url: "http://127.0.0.1:9".to_string(),
            chatbot_timeout_secs: 1,
        }
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow!("{}", e))
            .with_context(|| format!("{} must be a valid value, got '{}'", name, raw)),
        Err(_) => Ok(default),
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_backend_parsing() {
        assert_eq!("postgres".parse::<StorageBackend>().unwrap(), StorageBackend::Postgres);
        assert_eq!(" Memory ".parse::<StorageBackend>().unwrap(), StorageBackend::Memory);
        assert!("sqlite".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_split_origins_skips_empty_entries() {
        let origins = split_origins("http://localhost:3000, ,https://unipool.app,");
        assert_eq!(origins, vec!["http://localhost:3000", "https://unipool.app"]);
    }

    #[test]
    fn test_server_url() {
        let mut config = EnvironmentConfig::for_tests();
        config.port = 8080;
        assert_eq!(config.server_url(), "127.0.0.1:8080");
    }
}
