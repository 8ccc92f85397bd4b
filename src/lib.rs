//! UniPool backend
//!
//! Backend de ride-sharing y alquiler de vehículos para el campus: viajes con
//! una sola reserva, vehículos con franjas reservables, telemetría OBD y un
//! chatbot de soporte.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_router;
pub use state::AppState;
