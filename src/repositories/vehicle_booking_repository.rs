use async_trait::async_trait;
use sqlx::PgPool;

use super::VehicleBookingRepository;
use crate::models::vehicle_booking::{NewVehicleBooking, VehicleBooking};
use crate::utils::errors::AppResult;

const SELECT_VEHICLE_BOOKING: &str = r#"
    SELECT b.id, b.availability_id, b.renter_id, v.name AS vehicle_name, a.pickup_point,
           a.available_from, a.available_to, a.price_per_hour, b.booked_at,
           b.liability_accepted, b.liability_accepted_at
    FROM vehicle_bookings b
    JOIN vehicle_availability a ON a.id = b.availability_id
    JOIN vehicles v ON v.id = a.vehicle_id
"#;

pub struct PgVehicleBookingRepository {
    pool: PgPool,
}

impl PgVehicleBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleBookingRepository for PgVehicleBookingRepository {
    async fn exists_for_renter(&self, availability_id: i64, renter_id: i64) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM vehicle_bookings WHERE availability_id = $1 AND renter_id = $2)",
        )
        .bind(availability_id)
        .bind(renter_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    async fn create(&self, new_booking: NewVehicleBooking) -> AppResult<Option<VehicleBooking>> {
        let mut tx = self.pool.begin().await?;

        // Compare-and-swap del flag: solo una transacción puede pasar de libre a reservada
        let flipped = sqlx::query(
            "UPDATE vehicle_availability SET is_booked = TRUE WHERE id = $1 AND is_booked = FALSE",
        )
        .bind(new_booking.availability_id)
        .execute(&mut *tx)
        .await?;

        if flipped.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let (booking_id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO vehicle_bookings (availability_id, renter_id, liability_accepted, liability_accepted_at)
            VALUES ($1, $2, TRUE, $3)
            RETURNING id
            "#,
        )
        .bind(new_booking.availability_id)
        .bind(new_booking.renter_id)
        .bind(new_booking.liability_accepted_at)
        .fetch_one(&mut *tx)
        .await?;

        let booking = sqlx::query_as::<_, VehicleBooking>(&format!(
            "{} WHERE b.id = $1",
            SELECT_VEHICLE_BOOKING
        ))
        .bind(booking_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(booking))
    }

    async fn find_owned(&self, id: i64, renter_id: i64) -> AppResult<Option<VehicleBooking>> {
        let booking = sqlx::query_as::<_, VehicleBooking>(&format!(
            "{} WHERE b.id = $1 AND b.renter_id = $2",
            SELECT_VEHICLE_BOOKING
        ))
        .bind(id)
        .bind(renter_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    async fn list_by_renter(&self, renter_id: i64) -> AppResult<Vec<VehicleBooking>> {
        let bookings = sqlx::query_as::<_, VehicleBooking>(&format!(
            "{} WHERE b.renter_id = $1 ORDER BY a.available_from",
            SELECT_VEHICLE_BOOKING
        ))
        .bind(renter_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    async fn cancel(&self, id: i64) -> AppResult<bool> {
        let mut tx = self.pool.begin().await?;

        let deleted: Option<(i64,)> =
            sqlx::query_as("DELETE FROM vehicle_bookings WHERE id = $1 RETURNING availability_id")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some((availability_id,)) = deleted else {
            tx.rollback().await?;
            return Ok(false);
        };

        sqlx::query("UPDATE vehicle_availability SET is_booked = FALSE WHERE id = $1")
            .bind(availability_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }
}
