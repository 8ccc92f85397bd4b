use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Reserva de un viaje por un pasajero
#[derive(Debug, Clone, FromRow)]
pub struct RideBooking {
    pub id: i64,
    pub ride_id: i64,
    pub passenger_id: i64,
    pub booked_at: DateTime<Utc>,
}

/// Reserva con los datos del viaje y el conductor, para listados y cancelación
#[derive(Debug, Clone, FromRow)]
pub struct RideBookingDetails {
    pub id: i64,
    pub ride_id: i64,
    pub passenger_id: i64,
    pub source: String,
    pub destination: String,
    pub departure_time: DateTime<Utc>,
    pub driver_username: String,
    pub booked_at: DateTime<Utc>,
}
