//! Utilidades de validación
//!
//! Validadores personalizados para `validator` usados por los DTOs.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use validator::ValidationError;

/// Decimales que admiten las columnas `NUMERIC(8, 2)`
const AMOUNT_SCALE: u32 = 2;

/// Importe máximo de las columnas `NUMERIC(8, 2)`
const AMOUNT_MAX: Decimal = Decimal::from_parts(99_999_999, 0, 0, false, AMOUNT_SCALE);

/// Validar un importe (tarifa, precio por hora): 0 ≤ importe ≤ 999999.99, dos decimales como máximo
pub fn validate_amount(value: &Decimal) -> Result<(), ValidationError> {
    let message = if value.is_sign_negative() && !value.is_zero() {
        "must not be negative"
    } else if *value > AMOUNT_MAX {
        "must not exceed 999999.99"
    } else if value.normalize().scale() > AMOUNT_SCALE {
        "must have at most 2 decimal places"
    } else {
        return Ok(());
    };

    let mut error = ValidationError::new("amount");
    error.message = Some(message.into());
    Err(error)
}

/// Validar que un string no esté vacío
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.message = Some("must not be blank".into());
        return Err(error);
    }
    Ok(())
}

/// Validar que una ventana temporal termine después de empezar
pub fn validate_window(from: &DateTime<Utc>, to: &DateTime<Utc>) -> Result<(), ValidationError> {
    if to <= from {
        let mut error = ValidationError::new("window");
        error.message = Some("available_to must be after available_from".into());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_amount() {
        assert!(validate_amount(&Decimal::new(1050, 2)).is_ok());
        assert!(validate_amount(&Decimal::ZERO).is_ok());
        assert!(validate_amount(&Decimal::new(99_999_999, 2)).is_ok());
        assert!(validate_amount(&Decimal::new(105_000, 4)).is_ok());
        assert!(validate_amount(&Decimal::new(-1, 0)).is_err());
        assert!(validate_amount(&Decimal::new(1_000_000, 0)).is_err());
        assert!(validate_amount(&Decimal::new(1_005, 3)).is_err());
    }

    #[test]
    fn test_not_blank() {
        assert!(validate_not_blank("North Gate").is_ok());
        assert!(validate_not_blank("   ").is_err());
    }

    #[test]
    fn test_window() {
        let from = Utc::now();
        assert!(validate_window(&from, &(from + Duration::hours(2))).is_ok());
        assert!(validate_window(&from, &from).is_err());
        assert!(validate_window(&from, &(from - Duration::minutes(1))).is_err());
    }
}
