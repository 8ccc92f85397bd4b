//! Almacenamiento en memoria
//!
//! Implementa todas las interfaces de repositorio sobre tablas en memoria
//! protegidas por un único `RwLock`. Cada operación compuesta toma el lock de
//! escritura durante toda la comprobación y escritura, así que las reservas
//! concurrentes se serializan igual que con las restricciones de PostgreSQL.
//! Se usa con `STORAGE_BACKEND=memory` y en los tests.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{
    AvailabilityRepository, ObdRepository, RideBookingRepository, RideDeletion, RideRepository,
    UserRepository, VehicleBookingRepository, VehicleRepository,
};
use crate::models::availability::{NewAvailability, VehicleAvailability};
use crate::models::obd::{ObdReading, ObdRecord};
use crate::models::ride::{NewRide, Ride};
use crate::models::ride_booking::{RideBooking, RideBookingDetails};
use crate::models::user::{NewUser, User};
use crate::models::vehicle::{NewVehicle, Vehicle};
use crate::models::vehicle_booking::{NewVehicleBooking, VehicleBooking};
use crate::utils::errors::{AppError, AppResult};

#[derive(Default)]
struct Tables {
    sequence: i64,
    users: BTreeMap<i64, User>,
    rides: BTreeMap<i64, Ride>,
    ride_bookings: BTreeMap<i64, RideBooking>,
    vehicles: BTreeMap<i64, Vehicle>,
    availability: BTreeMap<i64, VehicleAvailability>,
    vehicle_bookings: BTreeMap<i64, VehicleBooking>,
    obd_records: Vec<ObdRecord>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.sequence += 1;
        self.sequence
    }

    fn ride_booking_details(&self, booking: &RideBooking) -> Option<RideBookingDetails> {
        let ride = self.rides.get(&booking.ride_id)?;
        Some(RideBookingDetails {
            id: booking.id,
            ride_id: ride.id,
            passenger_id: booking.passenger_id,
            source: ride.source.clone(),
            destination: ride.destination.clone(),
            departure_time: ride.departure_time,
            driver_username: ride.driver_username.clone(),
            booked_at: booking.booked_at,
        })
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let mut tables = self.tables.write().await;

        let duplicate = tables.users.values().any(|u| {
            u.username == new_user.username
                || (new_user.university_id.is_some() && u.university_id == new_user.university_id)
        });
        if duplicate {
            return Err(AppError::Conflict(
                "Username or University ID already registered".to_string(),
            ));
        }

        let user = User {
            id: tables.next_id(),
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            university_id: new_user.university_id,
            phone_number: new_user.phone_number,
            is_verified: false,
            created_at: Utc::now(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }

    async fn username_exists(&self, username: &str) -> AppResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().any(|u| u.username == username))
    }

    async fn university_id_exists(&self, university_id: &str) -> AppResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .any(|u| u.university_id.as_deref() == Some(university_id)))
    }
}

#[async_trait]
impl RideRepository for MemoryStore {
    async fn create(&self, new_ride: NewRide) -> AppResult<Ride> {
        let mut tables = self.tables.write().await;

        let driver_username = tables
            .users
            .get(&new_ride.driver_id)
            .map(|u| u.username.clone())
            .ok_or_else(|| AppError::Internal("Driver does not exist".to_string()))?;

        let ride = Ride {
            id: tables.next_id(),
            driver_id: new_ride.driver_id,
            driver_username,
            source: new_ride.source,
            destination: new_ride.destination,
            departure_time: new_ride.departure_time,
            fare: new_ride.fare,
            available_seats: new_ride.available_seats,
            created_at: Utc::now(),
        };
        tables.rides.insert(ride.id, ride.clone());
        Ok(ride)
    }

    async fn list_all(&self) -> AppResult<Vec<Ride>> {
        let tables = self.tables.read().await;
        let mut rides: Vec<Ride> = tables.rides.values().cloned().collect();
        rides.sort_by_key(|r| r.departure_time);
        Ok(rides)
    }

    async fn list_by_driver(&self, driver_id: i64) -> AppResult<Vec<Ride>> {
        let tables = self.tables.read().await;
        let mut rides: Vec<Ride> = tables
            .rides
            .values()
            .filter(|r| r.driver_id == driver_id)
            .cloned()
            .collect();
        rides.sort_by_key(|r| r.departure_time);
        Ok(rides)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Ride>> {
        Ok(self.tables.read().await.rides.get(&id).cloned())
    }

    async fn find_owned(&self, id: i64, driver_id: i64) -> AppResult<Option<Ride>> {
        let tables = self.tables.read().await;
        Ok(tables.rides.get(&id).filter(|r| r.driver_id == driver_id).cloned())
    }

    async fn delete_if_unbooked(&self, id: i64) -> AppResult<RideDeletion> {
        let mut tables = self.tables.write().await;

        if !tables.rides.contains_key(&id) {
            return Ok(RideDeletion::Missing);
        }
        if tables.ride_bookings.values().any(|b| b.ride_id == id) {
            return Ok(RideDeletion::HasBookings);
        }

        tables.rides.remove(&id);
        Ok(RideDeletion::Deleted)
    }
}

#[async_trait]
impl RideBookingRepository for MemoryStore {
    async fn exists_for_ride(&self, ride_id: i64) -> AppResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.ride_bookings.values().any(|b| b.ride_id == ride_id))
    }

    async fn exists_for_passenger(&self, ride_id: i64, passenger_id: i64) -> AppResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables
            .ride_bookings
            .values()
            .any(|b| b.ride_id == ride_id && b.passenger_id == passenger_id))
    }

    async fn create(&self, ride_id: i64, passenger_id: i64) -> AppResult<Option<RideBooking>> {
        let mut tables = self.tables.write().await;

        if !tables.rides.contains_key(&ride_id) {
            return Err(AppError::NotFound("Ride not found".to_string()));
        }
        if tables.ride_bookings.values().any(|b| b.ride_id == ride_id) {
            return Ok(None);
        }

        let booking = RideBooking {
            id: tables.next_id(),
            ride_id,
            passenger_id,
            booked_at: Utc::now(),
        };
        tables.ride_bookings.insert(booking.id, booking.clone());
        Ok(Some(booking))
    }

    async fn find_owned(&self, id: i64, passenger_id: i64) -> AppResult<Option<RideBookingDetails>> {
        let tables = self.tables.read().await;
        Ok(tables
            .ride_bookings
            .get(&id)
            .filter(|b| b.passenger_id == passenger_id)
            .and_then(|b| tables.ride_booking_details(b)))
    }

    async fn list_by_passenger(&self, passenger_id: i64) -> AppResult<Vec<RideBookingDetails>> {
        let tables = self.tables.read().await;
        let mut bookings: Vec<RideBookingDetails> = tables
            .ride_bookings
            .values()
            .filter(|b| b.passenger_id == passenger_id)
            .filter_map(|b| tables.ride_booking_details(b))
            .collect();
        bookings.sort_by_key(|b| b.departure_time);
        Ok(bookings)
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        Ok(self.tables.write().await.ride_bookings.remove(&id).is_some())
    }
}

#[async_trait]
impl VehicleRepository for MemoryStore {
    async fn create(&self, new_vehicle: NewVehicle) -> AppResult<Vehicle> {
        let mut tables = self.tables.write().await;

        if tables
            .vehicles
            .values()
            .any(|v| v.registration_number == new_vehicle.registration_number)
        {
            return Err(AppError::Conflict("Registration number already exists".to_string()));
        }

        let vehicle = Vehicle {
            id: tables.next_id(),
            driver_id: new_vehicle.driver_id,
            name: new_vehicle.name,
            registration_number: new_vehicle.registration_number,
            price_per_hour: new_vehicle.price_per_hour,
            available_from: new_vehicle.available_from,
            available_to: new_vehicle.available_to,
        };
        tables.vehicles.insert(vehicle.id, vehicle.clone());
        Ok(vehicle)
    }

    async fn registration_exists(&self, registration_number: &str) -> AppResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables
            .vehicles
            .values()
            .any(|v| v.registration_number == registration_number))
    }

    async fn list_by_driver(&self, driver_id: i64) -> AppResult<Vec<Vehicle>> {
        let tables = self.tables.read().await;
        Ok(tables
            .vehicles
            .values()
            .filter(|v| v.driver_id == driver_id)
            .cloned()
            .collect())
    }

    async fn find_owned(&self, id: i64, driver_id: i64) -> AppResult<Option<Vehicle>> {
        let tables = self.tables.read().await;
        Ok(tables.vehicles.get(&id).filter(|v| v.driver_id == driver_id).cloned())
    }
}

#[async_trait]
impl AvailabilityRepository for MemoryStore {
    async fn create(&self, new_availability: NewAvailability) -> AppResult<VehicleAvailability> {
        let mut tables = self.tables.write().await;

        let vehicle = tables
            .vehicles
            .get(&new_availability.vehicle_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        let slot = VehicleAvailability {
            id: tables.next_id(),
            vehicle_id: vehicle.id,
            driver_id: vehicle.driver_id,
            vehicle_name: vehicle.name,
            vehicle_registration: vehicle.registration_number,
            pickup_point: new_availability.pickup_point,
            available_from: new_availability.available_from,
            available_to: new_availability.available_to,
            price_per_hour: new_availability.price_per_hour,
            is_booked: false,
            created_at: Utc::now(),
        };
        tables.availability.insert(slot.id, slot.clone());
        Ok(slot)
    }

    async fn list_open(&self) -> AppResult<Vec<VehicleAvailability>> {
        let tables = self.tables.read().await;
        let mut slots: Vec<VehicleAvailability> = tables
            .availability
            .values()
            .filter(|a| !a.is_booked)
            .cloned()
            .collect();
        slots.sort_by_key(|a| a.available_from);
        Ok(slots)
    }

    async fn list_by_owner(&self, driver_id: i64) -> AppResult<Vec<VehicleAvailability>> {
        let tables = self.tables.read().await;
        let mut slots: Vec<VehicleAvailability> = tables
            .availability
            .values()
            .filter(|a| a.driver_id == driver_id)
            .cloned()
            .collect();
        slots.sort_by_key(|a| a.available_from);
        Ok(slots)
    }

    async fn find_open(&self, id: i64) -> AppResult<Option<VehicleAvailability>> {
        let tables = self.tables.read().await;
        Ok(tables.availability.get(&id).filter(|a| !a.is_booked).cloned())
    }
}

#[async_trait]
impl VehicleBookingRepository for MemoryStore {
    async fn exists_for_renter(&self, availability_id: i64, renter_id: i64) -> AppResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables
            .vehicle_bookings
            .values()
            .any(|b| b.availability_id == availability_id && b.renter_id == renter_id))
    }

    async fn create(&self, new_booking: NewVehicleBooking) -> AppResult<Option<VehicleBooking>> {
        let mut tables = self.tables.write().await;
        let booking_id = tables.next_id();

        let Some(slot) = tables.availability.get_mut(&new_booking.availability_id) else {
            return Ok(None);
        };
        if slot.is_booked {
            return Ok(None);
        }
        slot.is_booked = true;

        let booking = VehicleBooking {
            id: booking_id,
            availability_id: slot.id,
            renter_id: new_booking.renter_id,
            vehicle_name: slot.vehicle_name.clone(),
            pickup_point: slot.pickup_point.clone(),
            available_from: slot.available_from,
            available_to: slot.available_to,
            price_per_hour: slot.price_per_hour,
            booked_at: Utc::now(),
            liability_accepted: true,
            liability_accepted_at: new_booking.liability_accepted_at,
        };
        tables.vehicle_bookings.insert(booking.id, booking.clone());
        Ok(Some(booking))
    }

    async fn find_owned(&self, id: i64, renter_id: i64) -> AppResult<Option<VehicleBooking>> {
        let tables = self.tables.read().await;
        Ok(tables
            .vehicle_bookings
            .get(&id)
            .filter(|b| b.renter_id == renter_id)
            .cloned())
    }

    async fn list_by_renter(&self, renter_id: i64) -> AppResult<Vec<VehicleBooking>> {
        let tables = self.tables.read().await;
        let mut bookings: Vec<VehicleBooking> = tables
            .vehicle_bookings
            .values()
            .filter(|b| b.renter_id == renter_id)
            .cloned()
            .collect();
        bookings.sort_by_key(|b| b.available_from);
        Ok(bookings)
    }

    async fn cancel(&self, id: i64) -> AppResult<bool> {
        let mut tables = self.tables.write().await;

        let Some(booking) = tables.vehicle_bookings.remove(&id) else {
            return Ok(false);
        };
        if let Some(slot) = tables.availability.get_mut(&booking.availability_id) {
            slot.is_booked = false;
        }
        Ok(true)
    }
}

#[async_trait]
impl ObdRepository for MemoryStore {
    async fn insert(&self, vehicle_id: i64, reading: ObdReading) -> AppResult<ObdRecord> {
        let mut tables = self.tables.write().await;

        let record = ObdRecord {
            id: tables.next_id(),
            vehicle_id,
            timestamp: Utc::now(),
            speed: reading.speed,
            rpm: reading.rpm,
            fuel_level: reading.fuel_level,
            error_code: reading.error_code,
            location_lat: reading.location_lat,
            location_lng: reading.location_lng,
        };
        tables.obd_records.push(record.clone());
        Ok(record)
    }

    async fn latest(&self, vehicle_id: i64, limit: i64) -> AppResult<Vec<ObdRecord>> {
        let tables = self.tables.read().await;
        let mut records: Vec<ObdRecord> = tables
            .obd_records
            .iter()
            .filter(|r| r.vehicle_id == vehicle_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        records.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(records)
    }
}
