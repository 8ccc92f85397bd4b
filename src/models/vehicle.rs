//! Modelo de Vehicle
//!
//! Vehículo de un conductor. La ventana `available_from/to` solo se registra
//! al crearlo; el inventario reservable vive en `VehicleAvailability`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

/// Vehicle - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, FromRow)]
pub struct Vehicle {
    pub id: i64,
    pub driver_id: i64,
    pub name: String,
    pub registration_number: String,
    pub price_per_hour: Decimal,
    pub available_from: DateTime<Utc>,
    pub available_to: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub driver_id: i64,
    pub name: String,
    pub registration_number: String,
    pub price_per_hour: Decimal,
    pub available_from: DateTime<Utc>,
    pub available_to: DateTime<Utc>,
}
