//! Reglas temporales de reserva y cancelación
//!
//! Los plazos se comparan contra la hora de la request, no son timeouts.

use chrono::{DateTime, Duration, Utc};

/// Minutos mínimos entre la request y la salida de un viaje para reservar o cancelar
pub const RIDE_CUTOFF_MINUTES: i64 = 30;

/// Minutos mínimos entre la request y el inicio de una franja para cancelar
pub const VEHICLE_CANCEL_CUTOFF_MINUTES: i64 = 60;

/// `true` si faltan menos de `cutoff_minutes` hasta `deadline`
pub fn within_cutoff(deadline: DateTime<Utc>, now: DateTime<Utc>, cutoff_minutes: i64) -> bool {
    deadline - now < Duration::minutes(cutoff_minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cutoff_boundary_is_exclusive() {
        let now = Utc::now();

        assert!(within_cutoff(now + Duration::minutes(29), now, RIDE_CUTOFF_MINUTES));
        assert!(!within_cutoff(now + Duration::minutes(30), now, RIDE_CUTOFF_MINUTES));
        assert!(!within_cutoff(now + Duration::minutes(31), now, RIDE_CUTOFF_MINUTES));
    }

    #[test]
    fn test_past_deadline_is_within_cutoff() {
        let now = Utc::now();
        assert!(within_cutoff(now - Duration::hours(3), now, VEHICLE_CANCEL_CUTOFF_MINUTES));
    }
}
