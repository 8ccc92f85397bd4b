//! Modelo de Ride
//!
//! Un viaje publicado por su conductor. `available_seats` es informativo:
//! la regla de reserva admite una sola reserva por viaje.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

/// Ride con el username del conductor (JOIN con users)
#[derive(Debug, Clone, FromRow)]
pub struct Ride {
    pub id: i64,
    pub driver_id: i64,
    pub driver_username: String,
    pub source: String,
    pub destination: String,
    pub departure_time: DateTime<Utc>,
    pub fare: Decimal,
    pub available_seats: i32,
    pub created_at: DateTime<Utc>,
}

impl Ride {
    pub fn is_driven_by(&self, user_id: i64) -> bool {
        self.driver_id == user_id
    }
}

#[derive(Debug, Clone)]
pub struct NewRide {
    pub driver_id: i64,
    pub source: String,
    pub destination: String,
    pub departure_time: DateTime<Utc>,
    pub fare: Decimal,
    pub available_seats: i32,
}
