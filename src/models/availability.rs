//! Modelo de VehicleAvailability
//!
//! Franja reservable de un vehículo. `is_booked` es la única fuente de verdad
//! sobre si la franja se puede reservar y solo cambia junto con la creación o
//! borrado de su `VehicleBooking`: `false -> true` al reservar, `true -> false`
//! al cancelar.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

/// Franja con los datos del vehículo y su dueño (JOIN con vehicles)
#[derive(Debug, Clone, FromRow)]
pub struct VehicleAvailability {
    pub id: i64,
    pub vehicle_id: i64,
    pub driver_id: i64,
    pub vehicle_name: String,
    pub vehicle_registration: String,
    pub pickup_point: String,
    pub available_from: DateTime<Utc>,
    pub available_to: DateTime<Utc>,
    pub price_per_hour: Decimal,
    pub is_booked: bool,
    pub created_at: DateTime<Utc>,
}

impl VehicleAvailability {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.driver_id == user_id
    }
}

#[derive(Debug, Clone)]
pub struct NewAvailability {
    pub vehicle_id: i64,
    pub pickup_point: String,
    pub available_from: DateTime<Utc>,
    pub available_to: DateTime<Utc>,
    pub price_per_hour: Decimal,
}
