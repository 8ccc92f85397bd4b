use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

/// Reserva de una franja, con los datos de la franja y del vehículo
#[derive(Debug, Clone, FromRow)]
pub struct VehicleBooking {
    pub id: i64,
    pub availability_id: i64,
    pub renter_id: i64,
    pub vehicle_name: String,
    pub pickup_point: String,
    pub available_from: DateTime<Utc>,
    pub available_to: DateTime<Utc>,
    pub price_per_hour: Decimal,
    pub booked_at: DateTime<Utc>,
    pub liability_accepted: bool,
    pub liability_accepted_at: DateTime<Utc>,
}

/// Datos para crear una reserva. Solo se construye con la responsabilidad aceptada.
#[derive(Debug, Clone)]
pub struct NewVehicleBooking {
    pub availability_id: i64,
    pub renter_id: i64,
    pub liability_accepted_at: DateTime<Utc>,
}
