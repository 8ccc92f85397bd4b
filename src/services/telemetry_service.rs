//! Telemetría OBD
//!
//! Solo el dueño del vehículo puede enviar o leer lecturas.

use log::debug;
use std::sync::Arc;

use crate::models::obd::{ObdReading, ObdRecord};
use crate::repositories::{ObdRepository, Repositories, VehicleRepository};
use crate::utils::errors::{AppError, AppResult};

/// Lecturas devueltas por consulta
pub const LATEST_READINGS: i64 = 10;

#[derive(Clone)]
pub struct TelemetryService {
    vehicles: Arc<dyn VehicleRepository>,
    records: Arc<dyn ObdRepository>,
}

impl TelemetryService {
    pub fn new(repositories: &Repositories) -> Self {
        Self {
            vehicles: repositories.vehicles.clone(),
            records: repositories.obd.clone(),
        }
    }

    pub async fn push(&self, owner_id: i64, vehicle_id: i64, reading: ObdReading) -> AppResult<ObdRecord> {
        self.ensure_owner(owner_id, vehicle_id).await?;

        let record = self.records.insert(vehicle_id, reading).await?;
        debug!("📡 OBD record {} para el vehicle {}", record.id, vehicle_id);
        Ok(record)
    }

    /// Las últimas lecturas, de la más reciente a la más vieja
    pub async fn latest(&self, owner_id: i64, vehicle_id: i64) -> AppResult<Vec<ObdRecord>> {
        self.ensure_owner(owner_id, vehicle_id).await?;
        self.records.latest(vehicle_id, LATEST_READINGS).await
    }

    async fn ensure_owner(&self, owner_id: i64, vehicle_id: i64) -> AppResult<()> {
        self.vehicles
            .find_owned(vehicle_id, owner_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("Vehicle not found or not owned by you".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::NewVehicle;
    use crate::services::test_support::seed_user;
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_latest_returns_ten_newest_first() {
        let repositories = Repositories::in_memory();
        let owner = seed_user(&repositories, "owner").await;
        let vehicle = repositories
            .vehicles
            .create(NewVehicle {
                driver_id: owner.id,
                name: "Activa".to_string(),
                registration_number: "MH12XY0001".to_string(),
                price_per_hour: Decimal::new(3, 0),
                available_from: Utc::now(),
                available_to: Utc::now() + Duration::days(1),
            })
            .await
            .unwrap();
        let service = TelemetryService::new(&repositories);

        let mut ids = Vec::new();
        for rpm in 0..12 {
            let record = service
                .push(
                    owner.id,
                    vehicle.id,
                    ObdReading {
                        rpm: Some(1000 + rpm),
                        ..ObdReading::default()
                    },
                )
                .await
                .unwrap();
            ids.push(record.id);
        }

        let latest = service.latest(owner.id, vehicle.id).await.unwrap();
        assert_eq!(latest.len(), 10);
        assert_eq!(latest[0].id, *ids.last().unwrap());
        assert!(latest.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    }

    #[tokio::test]
    async fn test_non_owner_gets_not_found() {
        let repositories = Repositories::in_memory();
        let owner = seed_user(&repositories, "owner").await;
        let stranger = seed_user(&repositories, "stranger").await;
        let vehicle = repositories
            .vehicles
            .create(NewVehicle {
                driver_id: owner.id,
                name: "Activa".to_string(),
                registration_number: "MH12XY0002".to_string(),
                price_per_hour: Decimal::new(3, 0),
                available_from: Utc::now(),
                available_to: Utc::now() + Duration::days(1),
            })
            .await
            .unwrap();
        let service = TelemetryService::new(&repositories);

        let push = service.push(stranger.id, vehicle.id, ObdReading::default()).await;
        assert!(matches!(push, Err(AppError::NotFound(_))));
        let read = service.latest(stranger.id, vehicle.id).await;
        assert!(matches!(read, Err(AppError::NotFound(_))));
    }
}
