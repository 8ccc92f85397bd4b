//! Telemetría OBD de un vehículo (solo inserción)

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct ObdRecord {
    pub id: i64,
    pub vehicle_id: i64,
    pub timestamp: DateTime<Utc>,
    pub speed: Option<f64>,
    pub rpm: Option<i32>,
    pub fuel_level: Option<f64>,
    pub error_code: Option<String>,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
}

/// Lectura recibida del dispositivo, todos los campos son opcionales
#[derive(Debug, Clone, Default)]
pub struct ObdReading {
    pub speed: Option<f64>,
    pub rpm: Option<i32>,
    pub fuel_level: Option<f64>,
    pub error_code: Option<String>,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
}
