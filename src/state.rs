//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Todos los servicios comparten el mismo
//! conjunto de repositorios.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::Repositories;
use crate::services::{
    AuthService, ChatbotService, JwtConfig, JwtService, RideService, TelemetryService, VehicleService,
};
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EnvironmentConfig>,
    pub auth: AuthService,
    pub rides: RideService,
    pub vehicles: VehicleService,
    pub telemetry: TelemetryService,
    pub chatbot: ChatbotService,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, repositories: Repositories) -> AppResult<Self> {
        let jwt_service = JwtService::new(JwtConfig::from(&config));

        Ok(Self {
            auth: AuthService::new(&repositories, jwt_service, config.bcrypt_cost),
            rides: RideService::new(&repositories),
            vehicles: VehicleService::new(&repositories),
            telemetry: TelemetryService::new(&repositories),
            chatbot: ChatbotService::new(&config)?,
            config: Arc::new(config),
        })
    }
}
