//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean
//! al schema PostgreSQL de `migrations/`.

pub mod auth;
pub mod availability;
pub mod obd;
pub mod ride;
pub mod ride_booking;
pub mod user;
pub mod vehicle;
pub mod vehicle_booking;
