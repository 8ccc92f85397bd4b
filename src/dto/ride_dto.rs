use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::amount;
use crate::models::ride::{NewRide, Ride};
use crate::models::ride_booking::{RideBooking, RideBookingDetails};
use crate::utils::validation::{validate_amount, validate_not_blank};

// Request para publicar un viaje
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRideRequest {
    #[validate(custom = "validate_not_blank", length(max = 100))]
    pub source: String,

    #[validate(custom = "validate_not_blank", length(max = 100))]
    pub destination: String,

    pub departure_time: DateTime<Utc>,

    #[validate(range(min = 0))]
    pub available_seats: i32,

    #[validate(custom = "validate_amount")]
    pub fare: Decimal,
}

impl CreateRideRequest {
    pub fn into_new_ride(self, driver_id: i64) -> NewRide {
        NewRide {
            driver_id,
            source: self.source,
            destination: self.destination,
            departure_time: self.departure_time,
            fare: self.fare,
            available_seats: self.available_seats,
        }
    }
}

// Response de viaje
#[derive(Debug, Serialize)]
pub struct RideResponse {
    pub id: i64,
    pub driver: String,
    pub source: String,
    pub destination: String,
    pub departure_time: DateTime<Utc>,
    pub available_seats: i32,
    pub fare: f64,
}

impl From<Ride> for RideResponse {
    fn from(ride: Ride) -> Self {
        Self {
            id: ride.id,
            driver: ride.driver_username,
            source: ride.source,
            destination: ride.destination,
            departure_time: ride.departure_time,
            available_seats: ride.available_seats,
            fare: amount(ride.fare),
        }
    }
}

// Reserva vista por el pasajero (/my-bookings)
#[derive(Debug, Serialize)]
pub struct PassengerBookingResponse {
    pub booking_id: i64,
    pub ride_id: i64,
    pub source: String,
    pub destination: String,
    pub departure_time: DateTime<Utc>,
    pub driver: String,
}

impl From<RideBookingDetails> for PassengerBookingResponse {
    fn from(booking: RideBookingDetails) -> Self {
        Self {
            booking_id: booking.id,
            ride_id: booking.ride_id,
            source: booking.source,
            destination: booking.destination,
            departure_time: booking.departure_time,
            driver: booking.driver_username,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookRideResponse {
    pub message: String,
    pub ride_id: i64,
    pub booking_id: i64,
}

impl From<RideBooking> for BookRideResponse {
    fn from(booking: RideBooking) -> Self {
        Self {
            message: "Ride booked successfully".to_string(),
            ride_id: booking.ride_id,
            booking_id: booking.id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CancelRideBookingResponse {
    pub message: String,
    pub ride_id: i64,
}

impl CancelRideBookingResponse {
    pub fn new(ride_id: i64) -> Self {
        Self {
            message: "Booking cancelled".to_string(),
            ride_id,
        }
    }
}
