use serde::{Deserialize, Serialize};

use crate::models::obd::{ObdReading, ObdRecord};

/// Lectura enviada por el dispositivo OBD. Todos los campos son opcionales.
#[derive(Debug, Default, Deserialize)]
pub struct ObdRequest {
    pub speed: Option<f64>,
    pub rpm: Option<i32>,
    pub fuel_level: Option<f64>,
    pub error_code: Option<String>,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
}

impl From<ObdRequest> for ObdReading {
    fn from(request: ObdRequest) -> Self {
        Self {
            speed: request.speed,
            rpm: request.rpm,
            fuel_level: request.fuel_level,
            error_code: request.error_code,
            location_lat: request.location_lat,
            location_lng: request.location_lng,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ObdResponse {
    pub timestamp: String,
    pub speed: Option<f64>,
    pub rpm: Option<i32>,
    pub fuel_level: Option<f64>,
    pub error_code: Option<String>,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
}

impl From<ObdRecord> for ObdResponse {
    fn from(record: ObdRecord) -> Self {
        Self {
            timestamp: record.timestamp.to_rfc3339(),
            speed: record.speed,
            rpm: record.rpm,
            fuel_level: record.fuel_level,
            error_code: record.error_code,
            location_lat: record.location_lat,
            location_lng: record.location_lng,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ObdStoredResponse {
    pub message: String,
    pub record_id: i64,
}

impl ObdStoredResponse {
    pub fn new(record_id: i64) -> Self {
        Self {
            message: "OBD data stored".to_string(),
            record_id,
        }
    }
}
