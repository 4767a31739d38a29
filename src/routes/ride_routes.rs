//! Rutas públicas y de clientes para rides

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use crate::controllers::booking_controller::BookingController;
use crate::dto::common::ApiResponse;
use crate::dto::ride_dto::{
    AvailabilityResponse, CheckAvailabilityRequest, CreateGuestRideRequest, CreateRideRequest,
    RideResponse,
};
use crate::models::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_ride_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_ride))
        .route("/guest", post(create_guest_ride))
        .route("/availability", post(check_availability))
        .route("/:id", get(get_ride))
}

/// Reserva autenticada: el cliente del token es el titular del viaje
async fn create_ride(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateRideRequest>,
) -> Result<Json<ApiResponse<RideResponse>>, AppError> {
    let controller = BookingController::new(state.pool.clone());
    let response = controller.create(user.id, request).await?;
    Ok(Json(response))
}

/// Reserva anónima
async fn create_guest_ride(
    State(state): State<AppState>,
    Json(request): Json<CreateGuestRideRequest>,
) -> Result<Json<ApiResponse<RideResponse>>, AppError> {
    let controller = BookingController::new(state.pool.clone());
    let response = controller.create_guest(request).await?;
    Ok(Json(response))
}

/// Comprobación de disponibilidad; acepta llamadas con o sin token
async fn check_availability(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Json(request): Json<CheckAvailabilityRequest>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let controller = BookingController::new(state.pool.clone());
    let response = controller.check_availability(user, request).await?;
    Ok(Json(response))
}

async fn get_ride(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<RideResponse>, AppError> {
    let controller = BookingController::new(state.pool.clone());
    let response = controller.get(id, &user).await?;
    Ok(Json(response))
}
