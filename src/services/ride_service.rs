//! Servicio de viajes
//!
//! Publicación, listado y borrado de viajes, y el ciclo de vida de su única
//! reserva. El orden de las comprobaciones define qué error ve el cliente
//! cuando fallan varias reglas a la vez.

use chrono::{DateTime, Utc};
use log::{info, warn};
use std::sync::Arc;

use crate::models::ride::{NewRide, Ride};
use crate::models::ride_booking::{RideBooking, RideBookingDetails};
use crate::repositories::{RideBookingRepository, RideDeletion, RideRepository, Repositories};
use crate::services::booking_rules::{within_cutoff, RIDE_CUTOFF_MINUTES};
use crate::utils::errors::{AppError, AppResult};

#[derive(Clone)]
pub struct RideService {
    rides: Arc<dyn RideRepository>,
    bookings: Arc<dyn RideBookingRepository>,
}

impl RideService {
    pub fn new(repositories: &Repositories) -> Self {
        Self {
            rides: repositories.rides.clone(),
            bookings: repositories.ride_bookings.clone(),
        }
    }

    /// Publicar un viaje. La hora de salida no se valida contra el reloj.
    pub async fn create_ride(&self, new_ride: NewRide) -> AppResult<Ride> {
        let ride = self.rides.create(new_ride).await?;
        info!("🚗 Ride {} publicado por {}", ride.id, ride.driver_username);
        Ok(ride)
    }

    pub async fn list_rides(&self) -> AppResult<Vec<Ride>> {
        self.rides.list_all().await
    }

    pub async fn list_driver_rides(&self, driver_id: i64) -> AppResult<Vec<Ride>> {
        self.rides.list_by_driver(driver_id).await
    }

    pub async fn list_passenger_bookings(&self, passenger_id: i64) -> AppResult<Vec<RideBookingDetails>> {
        self.bookings.list_by_passenger(passenger_id).await
    }

    /// Borrar un viaje propio sin reservas
    pub async fn delete_ride(&self, ride_id: i64, requester_id: i64) -> AppResult<()> {
        self.rides
            .find_owned(ride_id, requester_id)
            .await?
            .ok_or_else(not_owned)?;

        if self.bookings.exists_for_ride(ride_id).await? {
            return Err(has_bookings());
        }

        // Entre la comprobación y el borrado puede entrar una reserva o desaparecer el viaje
        match self.rides.delete_if_unbooked(ride_id).await? {
            RideDeletion::Deleted => {}
            RideDeletion::HasBookings => return Err(has_bookings()),
            RideDeletion::Missing => return Err(not_owned()),
        }

        info!("🗑️ Ride {} borrado por el usuario {}", ride_id, requester_id);
        Ok(())
    }

    /// Reservar un viaje. El primer pasajero gana; no se cuentan plazas.
    pub async fn book_ride(&self, ride_id: i64, requester_id: i64, now: DateTime<Utc>) -> AppResult<RideBooking> {
        let ride = self
            .rides
            .find_by_id(ride_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ride not found".to_string()))?;

        if within_cutoff(ride.departure_time, now, RIDE_CUTOFF_MINUTES) {
            return Err(AppError::Conflict(
                "Cannot book a ride within 30 minutes of departure".to_string(),
            ));
        }

        if self.bookings.exists_for_passenger(ride_id, requester_id).await? {
            return Err(AppError::Conflict("You already booked this ride".to_string()));
        }

        if self.bookings.exists_for_ride(ride_id).await? {
            return Err(already_taken());
        }

        let booking = self
            .bookings
            .create(ride_id, requester_id)
            .await?
            .ok_or_else(|| {
                warn!("⚠️ Ride {} reservado por otro pasajero en paralelo", ride_id);
                already_taken()
            })?;

        info!("✅ Ride {} reservado por el usuario {} (booking {})", ride_id, requester_id, booking.id);
        Ok(booking)
    }

    /// Cancelar una reserva propia. Devuelve el id del viaje liberado.
    pub async fn cancel_booking(&self, booking_id: i64, requester_id: i64, now: DateTime<Utc>) -> AppResult<i64> {
        let booking = self
            .bookings
            .find_owned(booking_id, requester_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        if within_cutoff(booking.departure_time, now, RIDE_CUTOFF_MINUTES) {
            return Err(AppError::Conflict(
                "Cannot cancel within 30 minutes of departure".to_string(),
            ));
        }

        if !self.bookings.delete(booking_id).await? {
            return Err(AppError::NotFound("Booking not found".to_string()));
        }

        info!("↩️ Booking {} cancelado, ride {} libre", booking_id, booking.ride_id);
        Ok(booking.ride_id)
    }
}

fn not_owned() -> AppError {
    AppError::NotFound("Ride not found or not owned by you".to_string())
}

fn has_bookings() -> AppError {
    AppError::Conflict("Cannot delete ride with existing bookings".to_string())
}

fn already_taken() -> AppError {
    AppError::Conflict("This ride is already booked by another passenger".to_string())
}
