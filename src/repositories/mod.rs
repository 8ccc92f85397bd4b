//! Repositorios
//!
//! Interfaces de almacenamiento por entidad, con las formas de consulta exactas
//! que usan los servicios (por id, por dueño, por estado). Hay una
//! implementación PostgreSQL por entidad y un `MemoryStore` que implementa
//! todas las interfaces.
//!
//! Las operaciones compuestas (`create` de reservas, `cancel`,
//! `delete_if_unbooked`) son atómicas: o se aplican completas o no se aplica
//! nada.

pub mod availability_repository;
pub mod memory;
pub mod obd_repository;
pub mod ride_booking_repository;
pub mod ride_repository;
pub mod user_repository;
pub mod vehicle_booking_repository;
pub mod vehicle_repository;

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::models::availability::{NewAvailability, VehicleAvailability};
use crate::models::obd::{ObdReading, ObdRecord};
use crate::models::ride::{NewRide, Ride};
use crate::models::ride_booking::{RideBooking, RideBookingDetails};
use crate::models::user::{NewUser, User};
use crate::models::vehicle::{NewVehicle, Vehicle};
use crate::models::vehicle_booking::{NewVehicleBooking, VehicleBooking};
use crate::utils::errors::AppResult;

use availability_repository::PgAvailabilityRepository;
use memory::MemoryStore;
use obd_repository::PgObdRepository;
use ride_booking_repository::PgRideBookingRepository;
use ride_repository::PgRideRepository;
use user_repository::PgUserRepository;
use vehicle_booking_repository::PgVehicleBookingRepository;
use vehicle_repository::PgVehicleRepository;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Falla con `Conflict` si el username o el university_id ya existen
    async fn create(&self, new_user: NewUser) -> AppResult<User>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;
    async fn username_exists(&self, username: &str) -> AppResult<bool>;
    async fn university_id_exists(&self, university_id: &str) -> AppResult<bool>;
}

#[async_trait]
pub trait RideRepository: Send + Sync {
    async fn create(&self, new_ride: NewRide) -> AppResult<Ride>;
    async fn list_all(&self) -> AppResult<Vec<Ride>>;
    async fn list_by_driver(&self, driver_id: i64) -> AppResult<Vec<Ride>>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Ride>>;
    async fn find_owned(&self, id: i64, driver_id: i64) -> AppResult<Option<Ride>>;
    /// Borra el viaje solo si no tiene reservas
    async fn delete_if_unbooked(&self, id: i64) -> AppResult<RideDeletion>;
}

/// Resultado de `RideRepository::delete_if_unbooked`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RideDeletion {
    Deleted,
    HasBookings,
    Missing,
}

#[async_trait]
pub trait RideBookingRepository: Send + Sync {
    async fn exists_for_ride(&self, ride_id: i64) -> AppResult<bool>;
    async fn exists_for_passenger(&self, ride_id: i64, passenger_id: i64) -> AppResult<bool>;
    /// Inserta la reserva. Devuelve `None` si el viaje ya tiene una.
    async fn create(&self, ride_id: i64, passenger_id: i64) -> AppResult<Option<RideBooking>>;
    async fn find_owned(&self, id: i64, passenger_id: i64) -> AppResult<Option<RideBookingDetails>>;
    async fn list_by_passenger(&self, passenger_id: i64) -> AppResult<Vec<RideBookingDetails>>;
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Falla con `Conflict` si la matrícula ya existe
    async fn create(&self, new_vehicle: NewVehicle) -> AppResult<Vehicle>;
    async fn registration_exists(&self, registration_number: &str) -> AppResult<bool>;
    async fn list_by_driver(&self, driver_id: i64) -> AppResult<Vec<Vehicle>>;
    async fn find_owned(&self, id: i64, driver_id: i64) -> AppResult<Option<Vehicle>>;
}

#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    async fn create(&self, new_availability: NewAvailability) -> AppResult<VehicleAvailability>;
    async fn list_open(&self) -> AppResult<Vec<VehicleAvailability>>;
    async fn list_by_owner(&self, driver_id: i64) -> AppResult<Vec<VehicleAvailability>>;
    /// Solo franjas con `is_booked = false`
    async fn find_open(&self, id: i64) -> AppResult<Option<VehicleAvailability>>;
}

#[async_trait]
pub trait VehicleBookingRepository: Send + Sync {
    async fn exists_for_renter(&self, availability_id: i64, renter_id: i64) -> AppResult<bool>;
    /// Marca la franja como reservada e inserta la reserva en una sola unidad.
    /// Devuelve `None` si la franja ya no estaba libre.
    async fn create(&self, new_booking: NewVehicleBooking) -> AppResult<Option<VehicleBooking>>;
    async fn find_owned(&self, id: i64, renter_id: i64) -> AppResult<Option<VehicleBooking>>;
    async fn list_by_renter(&self, renter_id: i64) -> AppResult<Vec<VehicleBooking>>;
    /// Borra la reserva y libera la franja en una sola unidad
    async fn cancel(&self, id: i64) -> AppResult<bool>;
}

#[async_trait]
pub trait ObdRepository: Send + Sync {
    async fn insert(&self, vehicle_id: i64, reading: ObdReading) -> AppResult<ObdRecord>;
    /// Las `limit` lecturas más recientes, de la más nueva a la más vieja
    async fn latest(&self, vehicle_id: i64, limit: i64) -> AppResult<Vec<ObdRecord>>;
}

/// Conjunto de repositorios que comparten un mismo almacenamiento
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub rides: Arc<dyn RideRepository>,
    pub ride_bookings: Arc<dyn RideBookingRepository>,
    pub vehicles: Arc<dyn VehicleRepository>,
    pub availability: Arc<dyn AvailabilityRepository>,
    pub vehicle_bookings: Arc<dyn VehicleBookingRepository>,
    pub obd: Arc<dyn ObdRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            rides: Arc::new(PgRideRepository::new(pool.clone())),
            ride_bookings: Arc::new(PgRideBookingRepository::new(pool.clone())),
            vehicles: Arc::new(PgVehicleRepository::new(pool.clone())),
            availability: Arc::new(PgAvailabilityRepository::new(pool.clone())),
            vehicle_bookings: Arc::new(PgVehicleBookingRepository::new(pool.clone())),
            obd: Arc::new(PgObdRepository::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        Self::from_memory(MemoryStore::new())
    }

    pub fn from_memory(store: MemoryStore) -> Self {
        Self {
            users: Arc::new(store.clone()),
            rides: Arc::new(store.clone()),
            ride_bookings: Arc::new(store.clone()),
            vehicles: Arc::new(store.clone()),
            availability: Arc::new(store.clone()),
            vehicle_bookings: Arc::new(store.clone()),
            obd: Arc::new(store),
        }
    }
}
