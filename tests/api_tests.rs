use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use unipool_backend::config::EnvironmentConfig;
use unipool_backend::repositories::Repositories;
use unipool_backend::{create_router, AppState};

fn create_test_app() -> Router {
    let state = AppState::new(EnvironmentConfig::for_tests(), Repositories::in_memory()).unwrap();
    create_router(state)
}

async fn send(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).to_string()))
    };

    (status, body)
}

/// Registra un usuario y devuelve su access token
async fn signup(app: &Router, username: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/signup",
        None,
        Some(json!({
            "username": username,
            "email": format!("{}@campus.edu", username),
            "password": "s3cure-pass",
            "university_id": format!("UNI-{}", username),
            "phone_number": "+91 90000 00000"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "signup failed: {}", body);
    body["access"].as_str().unwrap().to_string()
}

async fn publish_ride(app: &Router, token: &str, minutes_ahead: i64) -> i64 {
    let departure = Utc::now() + Duration::minutes(minutes_ahead);
    let (status, body) = send(
        app,
        Method::POST,
        "/api/rides",
        Some(token),
        Some(json!({
            "source": "Hostel 4",
            "destination": "City Mall",
            "departure_time": departure.to_rfc3339(),
            "available_seats": 3,
            "fare": 80.0
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "create ride failed: {}", body);
    body["id"].as_i64().unwrap()
}

async fn register_vehicle(app: &Router, token: &str, registration: &str) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/api/vehicles",
        Some(token),
        Some(json!({
            "name": "Honda City",
            "registration_number": registration,
            "price_per_hour": 10,
            "available_from": "2025-01-01T00:00:00Z",
            "available_to": "2025-12-31T00:00:00Z"
        })),
    )
    .await
}

async fn open_slot(app: &Router, token: &str, vehicle_id: i64, from: &str, to: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/vehicle-availability",
        Some(token),
        Some(json!({
            "vehicle_id": vehicle_id,
            "pickup_point": "Main Gate",
            "available_from": from,
            "available_to": to,
            "price_per_hour": 10
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "create availability failed: {}", body);
    assert_eq!(body["is_booked"], false);
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_signup_login_and_me() {
    let app = create_test_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/signup",
        None,
        Some(json!({
            "username": "asha",
            "email": "asha@campus.edu",
            "password": "s3cure-pass",
            "university_id": "UNI-001"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "asha");
    assert_eq!(body["university_id"], "UNI-001");
    assert!(body["phone_number"].is_null());
    assert!(body["refresh"].is_string());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "username": "asha", "password": "s3cure-pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let access = body["access"].as_str().unwrap().to_string();

    let (status, body) = send(&app, Method::GET, "/api/me", Some(&access), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "asha");
    assert!(body["id"].is_i64());
}

#[tokio::test]
async fn test_signup_duplicates_and_bad_login() {
    let app = create_test_app();
    signup(&app, "ravi").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/signup",
        None,
        Some(json!({
            "username": "ravi",
            "email": "other@campus.edu",
            "password": "s3cure-pass",
            "university_id": "UNI-other"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "status": 400, "message": "Username already exists" }));

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/signup",
        None,
        Some(json!({
            "username": "meera",
            "email": "meera@campus.edu",
            "password": "s3cure-pass",
            "university_id": "UNI-ravi"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "University ID already registered");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "username": "ravi", "password": "wrong-pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = create_test_app();

    let (status, body) = send(&app, Method::GET, "/api/rides", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], 401);

    let (status, _) = send(&app, Method::GET, "/api/rides", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_token_flow() {
    let app = create_test_app();
    let (_, body) = send(
        &app,
        Method::POST,
        "/api/signup",
        None,
        Some(json!({
            "username": "kiran",
            "email": "kiran@campus.edu",
            "password": "s3cure-pass",
            "university_id": "UNI-kiran"
        })),
    )
    .await;
    let refresh = body["refresh"].as_str().unwrap().to_string();
    let access = body["access"].as_str().unwrap().to_string();

    let (status, body) = send(&app, Method::POST, "/api/token/refresh", None, Some(json!({ "refresh": refresh }))).await;
    assert_eq!(status, StatusCode::OK);
    let new_access = body["access"].as_str().unwrap().to_string();

    let (status, _) = send(&app, Method::GET, "/api/me", Some(&new_access), None).await;
    assert_eq!(status, StatusCode::OK);

    // Un access token no se acepta como refresh
    let (status, _) = send(&app, Method::POST, "/api/token/refresh", None, Some(json!({ "refresh": access }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_ride_booking_lifecycle() {
    let app = create_test_app();
    let driver = signup(&app, "driver").await;
    let alice = signup(&app, "alice").await;
    let bob = signup(&app, "bob").await;

    let ride_id = publish_ride(&app, &driver, 180).await;

    let (status, rides) = send(&app, Method::GET, "/api/rides", Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rides[0]["driver"], "driver");
    assert_eq!(rides[0]["fare"], 80.0);

    let (status, body) = send(&app, Method::POST, &format!("/api/rides/{}/book", ride_id), Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Ride booked successfully");
    let booking_id = body["booking_id"].as_i64().unwrap();

    let (status, body) = send(&app, Method::POST, &format!("/api/rides/{}/book", ride_id), Some(&alice), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "You already booked this ride");

    let (status, body) = send(&app, Method::POST, &format!("/api/rides/{}/book", ride_id), Some(&bob), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "This ride is already booked by another passenger");

    let (_, bookings) = send(&app, Method::GET, "/api/my-bookings", Some(&alice), None).await;
    assert_eq!(bookings[0]["booking_id"], booking_id);
    assert_eq!(bookings[0]["driver"], "driver");

    let (status, body) = send(&app, Method::DELETE, &format!("/api/rides/{}", ride_id), Some(&driver), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Cannot delete ride with existing bookings");

    let (status, _) = send(&app, Method::DELETE, &format!("/api/bookings/{}/cancel", booking_id), Some(&bob), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::DELETE, &format!("/api/bookings/{}/cancel", booking_id), Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ride_id"], ride_id);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/rides/{}", ride_id), Some(&alice), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::DELETE, &format!("/api/rides/{}", ride_id), Some(&driver), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Ride deleted successfully");

    let (_, mine) = send(&app, Method::GET, "/api/my-rides", Some(&driver), None).await;
    assert_eq!(mine, json!([]));
}

#[tokio::test]
async fn test_booking_ride_inside_thirty_minutes_is_rejected() {
    let app = create_test_app();
    let driver = signup(&app, "driver").await;
    let passenger = signup(&app, "passenger").await;
    let ride_id = publish_ride(&app, &driver, 10).await;

    let (status, body) = send(&app, Method::POST, &format!("/api/rides/{}/book", ride_id), Some(&passenger), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Cannot book a ride within 30 minutes of departure");

    let (status, _) = send(&app, Method::POST, "/api/rides/9999/book", Some(&passenger), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_vehicle_slot_scenario() {
    let app = create_test_app();
    let owner = signup(&app, "owner").await;
    let renter = signup(&app, "renter").await;

    let (status, vehicle) = register_vehicle(&app, &owner, "DL01AB1234").await;
    assert_eq!(status, StatusCode::OK);
    let vehicle_id = vehicle["id"].as_i64().unwrap();

    let (status, body) = register_vehicle(&app, &renter, "DL01AB1234").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Registration number already exists");

    let slot_a = open_slot(&app, &owner, vehicle_id, "2025-01-01T10:00:00Z", "2025-01-01T12:00:00Z").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/vehicle-booking",
        Some(&renter),
        Some(json!({ "availability_id": slot_a, "liability_accepted": false })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "You must accept the liability agreement to proceed");

    let (status, booking) = send(
        &app,
        Method::POST,
        "/api/vehicle-booking",
        Some(&renter),
        Some(json!({ "availability_id": slot_a, "liability_accepted": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(booking["availability_id"], slot_a);
    assert_eq!(booking["liability_accepted"], true);
    assert_eq!(booking["price_per_hour"], 10.0);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/vehicle-booking",
        Some(&renter),
        Some(json!({ "availability_id": slot_a, "liability_accepted": true })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Vehicle availability not found or already booked");

    let slot_b = open_slot(&app, &owner, vehicle_id, "2025-01-02T10:00:00Z", "2025-01-02T12:00:00Z").await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/vehicle-booking",
        Some(&owner),
        Some(json!({ "availability_id": slot_b, "liability_accepted": true })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "You cannot book your own vehicle");

    // Público: solo franjas libres. Dueño: todas.
    let (_, public) = send(&app, Method::GET, "/api/vehicle-availability", Some(&renter), None).await;
    let public_ids: Vec<i64> = public.as_array().unwrap().iter().map(|s| s["id"].as_i64().unwrap()).collect();
    assert_eq!(public_ids, vec![slot_b]);

    let (_, owned) = send(&app, Method::GET, "/api/my-vehicle-availability", Some(&owner), None).await;
    assert_eq!(owned.as_array().unwrap().len(), 2);

    // La franja ya empezó: no se puede cancelar
    let booking_id = booking["id"].as_i64().unwrap();
    let (status, body) = send(&app, Method::DELETE, &format!("/api/vehicle-booking/{}", booking_id), Some(&renter), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Cannot cancel within 1 hour of start time");
}

#[tokio::test]
async fn test_vehicle_booking_cancel_reopens_slot() {
    let app = create_test_app();
    let owner = signup(&app, "owner").await;
    let renter = signup(&app, "renter").await;

    let (_, vehicle) = register_vehicle(&app, &owner, "KA05MN4321").await;
    let vehicle_id = vehicle["id"].as_i64().unwrap();

    let from = Utc::now() + Duration::days(2);
    let to = from + Duration::hours(3);
    let slot = open_slot(&app, &owner, vehicle_id, &from.to_rfc3339(), &to.to_rfc3339()).await;

    let (_, booking) = send(
        &app,
        Method::POST,
        "/api/vehicle-booking",
        Some(&renter),
        Some(json!({ "availability_id": slot, "liability_accepted": true })),
    )
    .await;
    let booking_id = booking["id"].as_i64().unwrap();

    let (_, mine) = send(&app, Method::GET, "/api/my-vehicle-bookings", Some(&renter), None).await;
    assert_eq!(mine[0]["id"], booking_id);
    assert_eq!(mine[0]["vehicle_name"], "Honda City");

    let (status, body) = send(&app, Method::DELETE, &format!("/api/vehicle-booking/{}", booking_id), Some(&renter), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Vehicle booking cancelled successfully");

    let (_, public) = send(&app, Method::GET, "/api/vehicle-availability", Some(&renter), None).await;
    assert_eq!(public[0]["id"], slot);
    assert_eq!(public[0]["is_booked"], false);

    let (_, mine) = send(&app, Method::GET, "/api/my-vehicle-bookings", Some(&renter), None).await;
    assert_eq!(mine, json!([]));
}

#[tokio::test]
async fn test_availability_requires_owned_vehicle() {
    let app = create_test_app();
    let owner = signup(&app, "owner").await;
    let stranger = signup(&app, "stranger").await;
    let (_, vehicle) = register_vehicle(&app, &owner, "MH12XY0001").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/vehicle-availability",
        Some(&stranger),
        Some(json!({
            "vehicle_id": vehicle["id"],
            "pickup_point": "Main Gate",
            "available_from": "2025-01-01T10:00:00Z",
            "available_to": "2025-01-01T12:00:00Z",
            "price_per_hour": 10
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Vehicle not found or not owned by you");

    let (_, listed) = send(&app, Method::GET, "/api/vehicles", Some(&stranger), None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn test_obd_push_and_read() {
    let app = create_test_app();
    let owner = signup(&app, "owner").await;
    let stranger = signup(&app, "stranger").await;
    let (_, vehicle) = register_vehicle(&app, &owner, "MH12XY0002").await;
    let uri = format!("/api/vehicles/{}/obd", vehicle["id"].as_i64().unwrap());

    let (status, body) = send(
        &app,
        Method::POST,
        &uri,
        Some(&owner),
        Some(json!({ "speed": 42.5, "rpm": 2100, "error_code": "P0301" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "OBD data stored");
    assert!(body["record_id"].is_i64());

    let (status, records) = send(&app, Method::GET, &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(records[0]["rpm"], 2100);
    assert_eq!(records[0]["error_code"], "P0301");
    assert!(records[0]["fuel_level"].is_null());

    let (status, _) = send(&app, Method::GET, &uri, Some(&stranger), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_chatbot_without_key() {
    let app = create_test_app();
    let token = signup(&app, "curious").await;

    let (status, body) = send(&app, Method::POST, "/api/chatbot?query=How%20do%20I%20book", Some(&token), None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Gemini API key not configured");
}

#[tokio::test]
async fn test_malformed_input_uses_error_body() {
    let app = create_test_app();
    let token = signup(&app, "sloppy").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/vehicle-booking",
        Some(&token),
        Some(json!({ "availability_id": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert!(body["message"].as_str().unwrap().contains("liability_accepted"));

    let (status, body) = send(&app, Method::POST, "/api/rides/abc/book", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert!(body["message"].is_string());

    let (status, body) = send(&app, Method::POST, "/api/chatbot", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert!(body["message"].as_str().unwrap().contains("query"));
}
