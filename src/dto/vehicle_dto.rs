use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::amount;
use crate::models::availability::{NewAvailability, VehicleAvailability};
use crate::models::vehicle::{NewVehicle, Vehicle};
use crate::models::vehicle_booking::VehicleBooking;
use crate::utils::validation::{validate_amount, validate_not_blank, validate_window};

// ============================================================================
// VEHÍCULOS
// ============================================================================

// Request para registrar un vehículo
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "vehicle_window"))]
pub struct CreateVehicleRequest {
    #[validate(custom = "validate_not_blank", length(max = 100))]
    pub name: String,

    #[validate(custom = "validate_not_blank", length(max = 20))]
    pub registration_number: String,

    #[validate(custom = "validate_amount")]
    pub price_per_hour: Decimal,

    pub available_from: DateTime<Utc>,
    pub available_to: DateTime<Utc>,
}

fn vehicle_window(request: &CreateVehicleRequest) -> Result<(), ValidationError> {
    validate_window(&request.available_from, &request.available_to)
}

impl CreateVehicleRequest {
    pub fn into_new_vehicle(self, driver_id: i64) -> NewVehicle {
        NewVehicle {
            driver_id,
            name: self.name,
            registration_number: self.registration_number.trim().to_string(),
            price_per_hour: self.price_per_hour,
            available_from: self.available_from,
            available_to: self.available_to,
        }
    }
}

// Response de vehículo
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: i64,
    pub name: String,
    pub registration_number: String,
    pub price_per_hour: f64,
    pub available_from: DateTime<Utc>,
    pub available_to: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            name: vehicle.name,
            registration_number: vehicle.registration_number,
            price_per_hour: amount(vehicle.price_per_hour),
            available_from: vehicle.available_from,
            available_to: vehicle.available_to,
        }
    }
}

// ============================================================================
// FRANJAS
// ============================================================================

#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "availability_window"))]
pub struct CreateAvailabilityRequest {
    pub vehicle_id: i64,

    #[validate(custom = "validate_not_blank", length(max = 200))]
    pub pickup_point: String,

    pub available_from: DateTime<Utc>,
    pub available_to: DateTime<Utc>,

    #[validate(custom = "validate_amount")]
    pub price_per_hour: Decimal,
}

fn availability_window(request: &CreateAvailabilityRequest) -> Result<(), ValidationError> {
    validate_window(&request.available_from, &request.available_to)
}

impl From<CreateAvailabilityRequest> for NewAvailability {
    fn from(request: CreateAvailabilityRequest) -> Self {
        Self {
            vehicle_id: request.vehicle_id,
            pickup_point: request.pickup_point,
            available_from: request.available_from,
            available_to: request.available_to,
            price_per_hour: request.price_per_hour,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub id: i64,
    pub vehicle_name: String,
    pub vehicle_registration: String,
    pub pickup_point: String,
    pub available_from: DateTime<Utc>,
    pub available_to: DateTime<Utc>,
    pub price_per_hour: f64,
    pub is_booked: bool,
}

impl From<VehicleAvailability> for AvailabilityResponse {
    fn from(slot: VehicleAvailability) -> Self {
        Self {
            id: slot.id,
            vehicle_name: slot.vehicle_name,
            vehicle_registration: slot.vehicle_registration,
            pickup_point: slot.pickup_point,
            available_from: slot.available_from,
            available_to: slot.available_to,
            price_per_hour: amount(slot.price_per_hour),
            is_booked: slot.is_booked,
        }
    }
}

// ============================================================================
// RESERVAS
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateVehicleBookingRequest {
    pub availability_id: i64,
    pub liability_accepted: bool,
}

#[derive(Debug, Serialize)]
pub struct VehicleBookingResponse {
    pub id: i64,
    pub availability_id: i64,
    pub vehicle_name: String,
    pub pickup_point: String,
    pub available_from: DateTime<Utc>,
    pub available_to: DateTime<Utc>,
    pub price_per_hour: f64,
    pub booked_at: DateTime<Utc>,
    pub liability_accepted: bool,
}

impl From<VehicleBooking> for VehicleBookingResponse {
    fn from(booking: VehicleBooking) -> Self {
        Self {
            id: booking.id,
            availability_id: booking.availability_id,
            vehicle_name: booking.vehicle_name,
            pickup_point: booking.pickup_point,
            available_from: booking.available_from,
            available_to: booking.available_to,
            price_per_hour: amount(booking.price_per_hour),
            booked_at: booking.booked_at,
            liability_accepted: booking.liability_accepted,
        }
    }
}
