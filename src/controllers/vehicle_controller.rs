use axum::{
    extract::State,
    Extension, Json,
};
use chrono::Utc;
use validator::Validate;

use crate::dto::obd_dto::{ObdRequest, ObdResponse, ObdStoredResponse};
use crate::dto::vehicle_dto::{
    AvailabilityResponse, CreateAvailabilityRequest, CreateVehicleBookingRequest, CreateVehicleRequest,
    VehicleBookingResponse, VehicleResponse,
};
use crate::dto::MessageResponse;
use crate::models::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppResult;
use crate::utils::extract::{ApiJson, ApiPath};

// ============================================================================
// VEHÍCULOS Y TELEMETRÍA
// ============================================================================

/// GET /api/vehicles
pub async fn list_vehicles(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> AppResult<Json<Vec<VehicleResponse>>> {
    let vehicles = state.vehicles.list_owner_vehicles(user.user_id).await?;
    Ok(Json(vehicles.into_iter().map(VehicleResponse::from).collect()))
}

/// POST /api/vehicles
pub async fn create_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(payload): ApiJson<CreateVehicleRequest>,
) -> AppResult<Json<VehicleResponse>> {
    payload.validate()?;
    let vehicle = state
        .vehicles
        .create_vehicle(payload.into_new_vehicle(user.user_id))
        .await?;
    Ok(Json(vehicle.into()))
}

/// GET /api/vehicles/:id/obd
pub async fn get_obd_data(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiPath(vehicle_id): ApiPath<i64>,
) -> AppResult<Json<Vec<ObdResponse>>> {
    let records = state.telemetry.latest(user.user_id, vehicle_id).await?;
    Ok(Json(records.into_iter().map(ObdResponse::from).collect()))
}

/// POST /api/vehicles/:id/obd
pub async fn push_obd_data(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiPath(vehicle_id): ApiPath<i64>,
    ApiJson(payload): ApiJson<ObdRequest>,
) -> AppResult<Json<ObdStoredResponse>> {
    let record = state
        .telemetry
        .push(user.user_id, vehicle_id, payload.into())
        .await?;
    Ok(Json(ObdStoredResponse::new(record.id)))
}

// ============================================================================
// FRANJAS
// ============================================================================

/// POST /api/vehicle-availability
pub async fn create_availability(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(payload): ApiJson<CreateAvailabilityRequest>,
) -> AppResult<Json<AvailabilityResponse>> {
    payload.validate()?;
    let slot = state
        .vehicles
        .create_availability(user.user_id, payload.into())
        .await?;
    Ok(Json(slot.into()))
}

/// GET /api/vehicle-availability
pub async fn list_open_availability(State(state): State<AppState>) -> AppResult<Json<Vec<AvailabilityResponse>>> {
    let slots = state.vehicles.list_open_availability().await?;
    Ok(Json(slots.into_iter().map(AvailabilityResponse::from).collect()))
}

/// GET /api/my-vehicle-availability
pub async fn my_availability(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> AppResult<Json<Vec<AvailabilityResponse>>> {
    let slots = state.vehicles.list_owner_availability(user.user_id).await?;
    Ok(Json(slots.into_iter().map(AvailabilityResponse::from).collect()))
}

// ============================================================================
// RESERVAS
// ============================================================================

/// POST /api/vehicle-booking
pub async fn create_vehicle_booking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(payload): ApiJson<CreateVehicleBookingRequest>,
) -> AppResult<Json<VehicleBookingResponse>> {
    let booking = state
        .vehicles
        .book_slot(
            user.user_id,
            payload.availability_id,
            payload.liability_accepted,
            Utc::now(),
        )
        .await?;
    Ok(Json(booking.into()))
}

/// GET /api/my-vehicle-bookings
pub async fn my_vehicle_bookings(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> AppResult<Json<Vec<VehicleBookingResponse>>> {
    let bookings = state.vehicles.list_renter_bookings(user.user_id).await?;
    Ok(Json(bookings.into_iter().map(VehicleBookingResponse::from).collect()))
}

/// DELETE /api/vehicle-booking/:id
pub async fn cancel_vehicle_booking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiPath(booking_id): ApiPath<i64>,
) -> AppResult<Json<MessageResponse>> {
    state
        .vehicles
        .cancel_booking(booking_id, user.user_id, Utc::now())
        .await?;
    Ok(Json(MessageResponse::new("Vehicle booking cancelled successfully")))
}
