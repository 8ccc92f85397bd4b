//! Servicio de alquiler de vehículos
//!
//! Vehículos, franjas de disponibilidad y reservas de franjas. Una franja
//! pasa de libre a reservada solo junto con la creación de su reserva, y
//! vuelve a libre solo junto con su cancelación.

use chrono::{DateTime, Utc};
use log::{info, warn};
use std::sync::Arc;

use crate::models::availability::{NewAvailability, VehicleAvailability};
use crate::models::vehicle::{NewVehicle, Vehicle};
use crate::models::vehicle_booking::{NewVehicleBooking, VehicleBooking};
use crate::repositories::{
    AvailabilityRepository, Repositories, VehicleBookingRepository, VehicleRepository,
};
use crate::services::booking_rules::{within_cutoff, VEHICLE_CANCEL_CUTOFF_MINUTES};
use crate::utils::errors::{AppError, AppResult};

#[derive(Clone)]
pub struct VehicleService {
    vehicles: Arc<dyn VehicleRepository>,
    availability: Arc<dyn AvailabilityRepository>,
    bookings: Arc<dyn VehicleBookingRepository>,
}

impl VehicleService {
    pub fn new(repositories: &Repositories) -> Self {
        Self {
            vehicles: repositories.vehicles.clone(),
            availability: repositories.availability.clone(),
            bookings: repositories.vehicle_bookings.clone(),
        }
    }

    // ========================================================================
    // VEHÍCULOS
    // ========================================================================

    pub async fn create_vehicle(&self, new_vehicle: NewVehicle) -> AppResult<Vehicle> {
        if self.vehicles.registration_exists(&new_vehicle.registration_number).await? {
            return Err(AppError::Conflict("Registration number already exists".to_string()));
        }

        let vehicle = self.vehicles.create(new_vehicle).await?;
        info!("🚙 Vehicle {} ({}) registrado", vehicle.id, vehicle.registration_number);
        Ok(vehicle)
    }

    /// Solo los vehículos del propio conductor
    pub async fn list_owner_vehicles(&self, driver_id: i64) -> AppResult<Vec<Vehicle>> {
        self.vehicles.list_by_driver(driver_id).await
    }

    // ========================================================================
    // FRANJAS
    // ========================================================================

    /// Crear una franja sobre un vehículo propio. No se comprueba solapamiento.
    pub async fn create_availability(
        &self,
        driver_id: i64,
        new_availability: NewAvailability,
    ) -> AppResult<VehicleAvailability> {
        self.vehicles
            .find_owned(new_availability.vehicle_id, driver_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found or not owned by you".to_string()))?;

        let slot = self.availability.create(new_availability).await?;
        info!("📅 Franja {} creada para el vehicle {}", slot.id, slot.vehicle_id);
        Ok(slot)
    }

    /// Franjas libres de todos los conductores
    pub async fn list_open_availability(&self) -> AppResult<Vec<VehicleAvailability>> {
        self.availability.list_open().await
    }

    /// Todas las franjas (libres y reservadas) de los vehículos del conductor
    pub async fn list_owner_availability(&self, driver_id: i64) -> AppResult<Vec<VehicleAvailability>> {
        self.availability.list_by_owner(driver_id).await
    }

    // ========================================================================
    // RESERVAS
    // ========================================================================

    pub async fn book_slot(
        &self,
        renter_id: i64,
        availability_id: i64,
        liability_accepted: bool,
        now: DateTime<Utc>,
    ) -> AppResult<VehicleBooking> {
        if !liability_accepted {
            return Err(AppError::Validation(
                "You must accept the liability agreement to proceed".to_string(),
            ));
        }

        let slot = self
            .availability
            .find_open(availability_id)
            .await?
            .ok_or_else(slot_unavailable)?;

        if slot.is_owned_by(renter_id) {
            return Err(AppError::Conflict("You cannot book your own vehicle".to_string()));
        }

        if self.bookings.exists_for_renter(availability_id, renter_id).await? {
            return Err(AppError::Conflict("You have already booked this vehicle".to_string()));
        }

        let booking = self
            .bookings
            .create(NewVehicleBooking {
                availability_id,
                renter_id,
                liability_accepted_at: now,
            })
            .await?
            .ok_or_else(|| {
                warn!("⚠️ Franja {} reservada por otro usuario en paralelo", availability_id);
                slot_unavailable()
            })?;

        info!("✅ Franja {} reservada por el usuario {} (booking {})", availability_id, renter_id, booking.id);
        Ok(booking)
    }

    pub async fn list_renter_bookings(&self, renter_id: i64) -> AppResult<Vec<VehicleBooking>> {
        self.bookings.list_by_renter(renter_id).await
    }

    /// Cancelar una reserva propia y liberar su franja
    pub async fn cancel_booking(&self, booking_id: i64, renter_id: i64, now: DateTime<Utc>) -> AppResult<()> {
        let booking = self
            .bookings
            .find_owned(booking_id, renter_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        if within_cutoff(booking.available_from, now, VEHICLE_CANCEL_CUTOFF_MINUTES) {
            return Err(AppError::Conflict("Cannot cancel within 1 hour of start time".to_string()));
        }

        if !self.bookings.cancel(booking_id).await? {
            return Err(AppError::NotFound("Booking not found".to_string()));
        }

        info!("↩️ Booking {} cancelado, franja {} libre", booking_id, booking.availability_id);
        Ok(())
    }
}

fn slot_unavailable() -> AppError {
    AppError::NotFound("Vehicle availability not found or already booked".to_string())
}
