//! Rutas de rides para conductores

use axum::{
    extract::{Path, State},
    routing::{get, patch, post},
    Json, Router,
};

use crate::controllers::driver_ride_controller::DriverRideController;
use crate::dto::common::ApiResponse;
use crate::dto::ride_dto::{RideResponse, UpdateRideStatusRequest};
use crate::middleware::auth_middleware::require_driver;
use crate::models::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_driver_ride_router() -> Router<AppState> {
    Router::new()
        .route("/", get(my_rides))
        .route("/:id/status", patch(update_ride_status))
        .route("/:id/complete", post(complete_ride))
}

async fn my_rides(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<RideResponse>>, AppError> {
    require_driver(&user)?;
    let controller = DriverRideController::new(&state);
    let response = controller.my_rides(user.id).await?;
    Ok(Json(response))
}

async fn update_ride_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(request): Json<UpdateRideStatusRequest>,
) -> Result<Json<ApiResponse<RideResponse>>, AppError> {
    require_driver(&user)?;
    let controller = DriverRideController::new(&state);
    let response = controller.update_status(id, user.id, request).await?;
    Ok(Json(response))
}

async fn complete_ride(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<RideResponse>>, AppError> {
    require_driver(&user)?;
    let controller = DriverRideController::new(&state);
    let response = controller.complete(id, user.id).await?;
    Ok(Json(response))
}
