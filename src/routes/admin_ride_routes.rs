//! Rutas admin de rides

use axum::{
    extract::{Path, Query, State},
    routing::{get, patch, post},
    Json, Router,
};

use crate::controllers::admin_ride_controller::AdminRideController;
use crate::dto::common::ApiResponse;
use crate::dto::dispatch_dto::AssignDriverRequest;
use crate::dto::ride_dto::{
    ApproveRideRequest, DeclineRideRequest, RideListFilters, RideResponse, UpdateRideStatusRequest,
};
use crate::middleware::auth_middleware::require_admin;
use crate::models::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_admin_ride_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_rides))
        .route("/:id/approve", post(approve_ride))
        .route("/:id/decline", post(decline_ride))
        .route("/:id/assign", post(assign_driver))
        .route("/:id/status", patch(update_ride_status))
}

async fn list_rides(
    State(state): State<AppState>,
    user: AuthUser,
    Query(filters): Query<RideListFilters>,
) -> Result<Json<Vec<RideResponse>>, AppError> {
    require_admin(&user)?;
    let controller = AdminRideController::new(&state);
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn approve_ride(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(request): Json<ApproveRideRequest>,
) -> Result<Json<ApiResponse<RideResponse>>, AppError> {
    require_admin(&user)?;
    let controller = AdminRideController::new(&state);
    let response = controller.approve(id, request).await?;
    Ok(Json(response))
}

async fn decline_ride(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(request): Json<DeclineRideRequest>,
) -> Result<Json<ApiResponse<RideResponse>>, AppError> {
    require_admin(&user)?;
    let controller = AdminRideController::new(&state);
    let response = controller.decline(id, request).await?;
    Ok(Json(response))
}

async fn assign_driver(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(request): Json<AssignDriverRequest>,
) -> Result<Json<ApiResponse<RideResponse>>, AppError> {
    require_admin(&user)?;
    let controller = AdminRideController::new(&state);
    let response = controller.assign(id, request).await?;
    Ok(Json(response))
}

async fn update_ride_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(request): Json<UpdateRideStatusRequest>,
) -> Result<Json<ApiResponse<RideResponse>>, AppError> {
    require_admin(&user)?;
    let controller = AdminRideController::new(&state);
    let response = controller.update_status(id, request).await?;
    Ok(Json(response))
}
