use async_trait::async_trait;
use sqlx::PgPool;

use super::ObdRepository;
use crate::models::obd::{ObdReading, ObdRecord};
use crate::utils::errors::AppResult;

pub struct PgObdRepository {
    pool: PgPool,
}

impl PgObdRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ObdRepository for PgObdRepository {
    async fn insert(&self, vehicle_id: i64, reading: ObdReading) -> AppResult<ObdRecord> {
        let record = sqlx::query_as::<_, ObdRecord>(
            r#"
            INSERT INTO obd_records (vehicle_id, speed, rpm, fuel_level, error_code, location_lat, location_lng)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(vehicle_id)
        .bind(reading.speed)
        .bind(reading.rpm)
        .bind(reading.fuel_level)
        .bind(&reading.error_code)
        .bind(reading.location_lat)
        .bind(reading.location_lng)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn latest(&self, vehicle_id: i64, limit: i64) -> AppResult<Vec<ObdRecord>> {
        let records = sqlx::query_as::<_, ObdRecord>(
            "SELECT * FROM obd_records WHERE vehicle_id = $1 ORDER BY timestamp DESC, id DESC LIMIT $2",
        )
        .bind(vehicle_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}
