use async_trait::async_trait;
use sqlx::PgPool;

use super::VehicleRepository;
use crate::models::vehicle::{NewVehicle, Vehicle};
use crate::utils::errors::{map_unique_violation, AppResult};

pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRepository for PgVehicleRepository {
    async fn create(&self, new_vehicle: NewVehicle) -> AppResult<Vehicle> {
        sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (driver_id, name, registration_number, price_per_hour, available_from, available_to)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(new_vehicle.driver_id)
        .bind(&new_vehicle.name)
        .bind(&new_vehicle.registration_number)
        .bind(new_vehicle.price_per_hour)
        .bind(new_vehicle.available_from)
        .bind(new_vehicle.available_to)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Registration number already exists"))
    }

    async fn registration_exists(&self, registration_number: &str) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM vehicles WHERE registration_number = $1)",
        )
        .bind(registration_number)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    async fn list_by_driver(&self, driver_id: i64) -> AppResult<Vec<Vehicle>> {
        let vehicles =
            sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE driver_id = $1 ORDER BY id")
                .bind(driver_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(vehicles)
    }

    async fn find_owned(&self, id: i64, driver_id: i64) -> AppResult<Option<Vehicle>> {
        let vehicle =
            sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1 AND driver_id = $2")
                .bind(id)
                .bind(driver_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(vehicle)
    }
}
