use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::controllers::ride_controller::{
    book_ride, cancel_booking, create_ride, delete_ride, list_rides, my_bookings, my_rides,
};
use crate::state::AppState;

/// Configura las rutas de viajes y sus reservas
pub fn ride_routes() -> Router<AppState> {
    Router::new()
        .route("/rides", get(list_rides).post(create_ride))
        .route("/rides/:id", delete(delete_ride))
        .route("/rides/:id/book", post(book_ride))
        .route("/my-rides", get(my_rides))
        .route("/my-bookings", get(my_bookings))
        .route("/bookings/:id/cancel", delete(cancel_booking))
}
