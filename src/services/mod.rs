//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación. Los servicios
//! reciben la identidad ya autenticada y solo comprueban propiedad y estado;
//! el acceso a datos va siempre por los traits de `repositories`.

pub mod auth_service;
pub mod booking_rules;
pub mod chatbot_service;
pub mod jwt_service;
pub mod ride_service;
pub mod telemetry_service;
pub mod vehicle_service;

pub use auth_service::AuthService;
pub use chatbot_service::ChatbotService;
pub use jwt_service::{JwtConfig, JwtService};
pub use ride_service::RideService;
pub use telemetry_service::TelemetryService;
pub use vehicle_service::VehicleService;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::user::{NewUser, User};
    use crate::repositories::Repositories;

    /// Inserta un usuario con datos derivados del username
    pub async fn seed_user(repositories: &Repositories, username: &str) -> User {
        repositories
            .users
            .create(NewUser {
                username: username.to_string(),
                email: format!("{}@campus.edu", username),
                password_hash: "not-a-real-hash".to_string(),
                university_id: Some(format!("UNI-{}", username)),
                phone_number: None,
            })
            .await
            .unwrap()
    }
}
