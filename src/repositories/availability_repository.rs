use async_trait::async_trait;
use sqlx::PgPool;

use super::AvailabilityRepository;
use crate::models::availability::{NewAvailability, VehicleAvailability};
use crate::utils::errors::AppResult;

const SELECT_AVAILABILITY: &str = r#"
    SELECT a.id, a.vehicle_id, v.driver_id, v.name AS vehicle_name,
           v.registration_number AS vehicle_registration, a.pickup_point,
           a.available_from, a.available_to, a.price_per_hour, a.is_booked, a.created_at
    FROM vehicle_availability a
    JOIN vehicles v ON v.id = a.vehicle_id
"#;

pub struct PgAvailabilityRepository {
    pool: PgPool,
}

impl PgAvailabilityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AvailabilityRepository for PgAvailabilityRepository {
    async fn create(&self, new_availability: NewAvailability) -> AppResult<VehicleAvailability> {
        let availability = sqlx::query_as::<_, VehicleAvailability>(
            r#"
            WITH inserted AS (
                INSERT INTO vehicle_availability (vehicle_id, pickup_point, available_from, available_to, price_per_hour)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
            )
            SELECT i.id, i.vehicle_id, v.driver_id, v.name AS vehicle_name,
                   v.registration_number AS vehicle_registration, i.pickup_point,
                   i.available_from, i.available_to, i.price_per_hour, i.is_booked, i.created_at
            FROM inserted i
            JOIN vehicles v ON v.id = i.vehicle_id
            "#,
        )
        .bind(new_availability.vehicle_id)
        .bind(&new_availability.pickup_point)
        .bind(new_availability.available_from)
        .bind(new_availability.available_to)
        .bind(new_availability.price_per_hour)
        .fetch_one(&self.pool)
        .await?;

        Ok(availability)
    }

    async fn list_open(&self) -> AppResult<Vec<VehicleAvailability>> {
        let slots = sqlx::query_as::<_, VehicleAvailability>(&format!(
            "{} WHERE a.is_booked = FALSE ORDER BY a.available_from",
            SELECT_AVAILABILITY
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(slots)
    }

    async fn list_by_owner(&self, driver_id: i64) -> AppResult<Vec<VehicleAvailability>> {
        let slots = sqlx::query_as::<_, VehicleAvailability>(&format!(
            "{} WHERE v.driver_id = $1 ORDER BY a.available_from",
            SELECT_AVAILABILITY
        ))
        .bind(driver_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(slots)
    }

    async fn find_open(&self, id: i64) -> AppResult<Option<VehicleAvailability>> {
        let slot = sqlx::query_as::<_, VehicleAvailability>(&format!(
            "{} WHERE a.id = $1 AND a.is_booked = FALSE",
            SELECT_AVAILABILITY
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(slot)
    }
}
