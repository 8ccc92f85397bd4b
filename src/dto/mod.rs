//! DTOs de la API
//!
//! Formas de request/response en JSON. Los importes se guardan como
//! `Decimal` y se exponen como número.

pub mod auth_dto;
pub mod chatbot_dto;
pub mod obd_dto;
pub mod ride_dto;
pub mod vehicle_dto;

use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Response genérica con solo un mensaje
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Importe como número JSON
pub fn amount(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount() {
        assert_eq!(amount(Decimal::new(1050, 2)), 10.5);
        assert_eq!(amount(Decimal::ZERO), 0.0);
    }
}
