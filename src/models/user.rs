//! Modelo de User
//!
//! Estudiante registrado. Puede ofrecer viajes y vehículos (como conductor)
//! y reservarlos (como pasajero o arrendatario).

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// User - mapea exactamente a la tabla users
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub university_id: Option<String>,
    pub phone_number: Option<String>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

/// Datos para insertar un usuario nuevo (password ya hasheada)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub university_id: Option<String>,
    pub phone_number: Option<String>,
}
