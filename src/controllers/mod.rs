//! Controllers
//!
//! Handlers de Axum: extraen la identidad y el payload, validan el DTO,
//! llaman al servicio y convierten el resultado a su response.

pub mod auth_controller;
pub mod chatbot_controller;
pub mod ride_controller;
pub mod vehicle_controller;
