use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::controllers::vehicle_controller::{
    cancel_vehicle_booking, create_availability, create_vehicle, create_vehicle_booking, get_obd_data,
    list_open_availability, list_vehicles, my_availability, my_vehicle_bookings, push_obd_data,
};
use crate::state::AppState;

/// Configura las rutas de vehículos, franjas, reservas y telemetría
pub fn vehicle_routes() -> Router<AppState> {
    Router::new()
        .route("/vehicles", get(list_vehicles).post(create_vehicle))
        .route("/vehicles/:id/obd", get(get_obd_data).post(push_obd_data))
        .route(
            "/vehicle-availability",
            get(list_open_availability).post(create_availability),
        )
        .route("/my-vehicle-availability", get(my_availability))
        .route("/vehicle-booking", post(create_vehicle_booking))
        .route("/vehicle-booking/:id", delete(cancel_vehicle_booking))
        .route("/my-vehicle-bookings", get(my_vehicle_bookings))
}
