use axum::{
    extract::State,
    Extension, Json,
};
use chrono::Utc;
use validator::Validate;

use crate::dto::ride_dto::{
    BookRideResponse, CancelRideBookingResponse, CreateRideRequest, PassengerBookingResponse, RideResponse,
};
use crate::dto::MessageResponse;
use crate::models::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppResult;
use crate::utils::extract::{ApiJson, ApiPath};

/// GET /api/rides
pub async fn list_rides(State(state): State<AppState>) -> AppResult<Json<Vec<RideResponse>>> {
    let rides = state.rides.list_rides().await?;
    Ok(Json(rides.into_iter().map(RideResponse::from).collect()))
}

/// POST /api/rides
pub async fn create_ride(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(payload): ApiJson<CreateRideRequest>,
) -> AppResult<Json<RideResponse>> {
    payload.validate()?;
    let ride = state.rides.create_ride(payload.into_new_ride(user.user_id)).await?;
    Ok(Json(ride.into()))
}

/// DELETE /api/rides/:id
pub async fn delete_ride(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiPath(ride_id): ApiPath<i64>,
) -> AppResult<Json<MessageResponse>> {
    state.rides.delete_ride(ride_id, user.user_id).await?;
    Ok(Json(MessageResponse::new("Ride deleted successfully")))
}

/// GET /api/my-rides
pub async fn my_rides(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> AppResult<Json<Vec<RideResponse>>> {
    let rides = state.rides.list_driver_rides(user.user_id).await?;
    Ok(Json(rides.into_iter().map(RideResponse::from).collect()))
}

/// GET /api/my-bookings
pub async fn my_bookings(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> AppResult<Json<Vec<PassengerBookingResponse>>> {
    let bookings = state.rides.list_passenger_bookings(user.user_id).await?;
    Ok(Json(bookings.into_iter().map(PassengerBookingResponse::from).collect()))
}

/// POST /api/rides/:id/book
pub async fn book_ride(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiPath(ride_id): ApiPath<i64>,
) -> AppResult<Json<BookRideResponse>> {
    let booking = state.rides.book_ride(ride_id, user.user_id, Utc::now()).await?;
    Ok(Json(booking.into()))
}

/// DELETE /api/bookings/:id/cancel
pub async fn cancel_booking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiPath(booking_id): ApiPath<i64>,
) -> AppResult<Json<CancelRideBookingResponse>> {
    let ride_id = state
        .rides
        .cancel_booking(booking_id, user.user_id, Utc::now())
        .await?;
    Ok(Json(CancelRideBookingResponse::new(ride_id)))
}
