use async_trait::async_trait;
use sqlx::PgPool;

use super::{RideDeletion, RideRepository};
use crate::models::ride::{NewRide, Ride};
use crate::utils::errors::AppResult;

const SELECT_RIDE: &str = r#"
    SELECT r.id, r.driver_id, u.username AS driver_username, r.source, r.destination,
           r.departure_time, r.fare, r.available_seats, r.created_at
    FROM rides r
    JOIN users u ON u.id = r.driver_id
"#;

pub struct PgRideRepository {
    pool: PgPool,
}

impl PgRideRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RideRepository for PgRideRepository {
    async fn create(&self, new_ride: NewRide) -> AppResult<Ride> {
        let ride = sqlx::query_as::<_, Ride>(
            r#"
            WITH inserted AS (
                INSERT INTO rides (driver_id, source, destination, departure_time, fare, available_seats)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
            )
            SELECT i.id, i.driver_id, u.username AS driver_username, i.source, i.destination,
                   i.departure_time, i.fare, i.available_seats, i.created_at
            FROM inserted i
            JOIN users u ON u.id = i.driver_id
            "#,
        )
        .bind(new_ride.driver_id)
        .bind(&new_ride.source)
        .bind(&new_ride.destination)
        .bind(new_ride.departure_time)
        .bind(new_ride.fare)
        .bind(new_ride.available_seats)
        .fetch_one(&self.pool)
        .await?;

        Ok(ride)
    }

    async fn list_all(&self) -> AppResult<Vec<Ride>> {
        let rides = sqlx::query_as::<_, Ride>(&format!("{} ORDER BY r.departure_time", SELECT_RIDE))
            .fetch_all(&self.pool)
            .await?;

        Ok(rides)
    }

    async fn list_by_driver(&self, driver_id: i64) -> AppResult<Vec<Ride>> {
        let rides = sqlx::query_as::<_, Ride>(&format!(
            "{} WHERE r.driver_id = $1 ORDER BY r.departure_time",
            SELECT_RIDE
        ))
        .bind(driver_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rides)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Ride>> {
        let ride = sqlx::query_as::<_, Ride>(&format!("{} WHERE r.id = $1", SELECT_RIDE))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(ride)
    }

    async fn find_owned(&self, id: i64, driver_id: i64) -> AppResult<Option<Ride>> {
        let ride = sqlx::query_as::<_, Ride>(&format!(
            "{} WHERE r.id = $1 AND r.driver_id = $2",
            SELECT_RIDE
        ))
        .bind(id)
        .bind(driver_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(ride)
    }

    async fn delete_if_unbooked(&self, id: i64) -> AppResult<RideDeletion> {
        let mut tx = self.pool.begin().await?;

        // El lock de fila bloquea inserciones concurrentes de reservas (FK KEY SHARE)
        let locked: Option<(i64,)> = sqlx::query_as("SELECT id FROM rides WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        if locked.is_none() {
            return Ok(RideDeletion::Missing);
        }

        let (has_bookings,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM ride_bookings WHERE ride_id = $1)")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;

        if has_bookings {
            tx.rollback().await?;
            return Ok(RideDeletion::HasBookings);
        }

        sqlx::query("DELETE FROM rides WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(RideDeletion::Deleted)
    }
}
