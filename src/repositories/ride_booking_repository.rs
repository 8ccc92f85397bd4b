use async_trait::async_trait;
use sqlx::PgPool;

use super::RideBookingRepository;
use crate::models::ride_booking::{RideBooking, RideBookingDetails};
use crate::utils::errors::AppResult;

const SELECT_BOOKING_DETAILS: &str = r#"
    SELECT b.id, b.ride_id, b.passenger_id, r.source, r.destination, r.departure_time,
           u.username AS driver_username, b.booked_at
    FROM ride_bookings b
    JOIN rides r ON r.id = b.ride_id
    JOIN users u ON u.id = r.driver_id
"#;

pub struct PgRideBookingRepository {
    pool: PgPool,
}

impl PgRideBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RideBookingRepository for PgRideBookingRepository {
    async fn exists_for_ride(&self, ride_id: i64) -> AppResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM ride_bookings WHERE ride_id = $1)")
                .bind(ride_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    async fn exists_for_passenger(&self, ride_id: i64, passenger_id: i64) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM ride_bookings WHERE ride_id = $1 AND passenger_id = $2)",
        )
        .bind(ride_id)
        .bind(passenger_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    async fn create(&self, ride_id: i64, passenger_id: i64) -> AppResult<Option<RideBooking>> {
        // UNIQUE(ride_id): el primero en insertar gana
        let booking = sqlx::query_as::<_, RideBooking>(
            r#"
            INSERT INTO ride_bookings (ride_id, passenger_id)
            VALUES ($1, $2)
            ON CONFLICT (ride_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(ride_id)
        .bind(passenger_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    async fn find_owned(&self, id: i64, passenger_id: i64) -> AppResult<Option<RideBookingDetails>> {
        let booking = sqlx::query_as::<_, RideBookingDetails>(&format!(
            "{} WHERE b.id = $1 AND b.passenger_id = $2",
            SELECT_BOOKING_DETAILS
        ))
        .bind(id)
        .bind(passenger_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    async fn list_by_passenger(&self, passenger_id: i64) -> AppResult<Vec<RideBookingDetails>> {
        let bookings = sqlx::query_as::<_, RideBookingDetails>(&format!(
            "{} WHERE b.passenger_id = $1 ORDER BY r.departure_time",
            SELECT_BOOKING_DETAILS
        ))
        .bind(passenger_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM ride_bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
