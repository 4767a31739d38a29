//! Controller de rides para conductores
//!
//! Un conductor solo ve y hace avanzar sus propios viajes. Las aristas que
//! puede aplicar están acotadas en el servicio de ciclo de vida.

use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::ride_dto::{RideResponse, UpdateRideStatusRequest};
use crate::models::ride::RideStatus;
use crate::repositories::ride_repository::RideRepository;
use crate::services::ride_lifecycle_service::{Actor, RideLifecycleService};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct DriverRideController {
    lifecycle: RideLifecycleService,
    rides: RideRepository,
}

impl DriverRideController {
    pub fn new(state: &AppState) -> Self {
        Self {
            lifecycle: RideLifecycleService::new(
                state.pool.clone(),
                state.notifier.clone(),
                state.invoices.clone(),
            ),
            rides: RideRepository::new(state.pool.clone()),
        }
    }

    /// Viajes abiertos asignados al conductor
    pub async fn my_rides(&self, driver_id: Uuid) -> AppResult<Vec<RideResponse>> {
        let rides = self.rides.list_open_by_driver(driver_id).await?;
        Ok(rides.into_iter().map(RideResponse::from).collect())
    }

    /// Avance de estado del viaje (en camino, llegada, en curso, no-show)
    pub async fn update_status(
        &self,
        ride_id: i64,
        driver_id: Uuid,
        request: UpdateRideStatusRequest,
    ) -> AppResult<ApiResponse<RideResponse>> {
        request.validate()?;
        let ride = self
            .lifecycle
            .transition(ride_id, Actor::Driver(driver_id), request.status, request.notes)
            .await?;

        Ok(ApiResponse::success(ride.into()))
    }

    /// IN_PROGRESS -> COMPLETED: fija el dropoff y suma el viaje al
    /// contador del conductor
    pub async fn complete(
        &self,
        ride_id: i64,
        driver_id: Uuid,
    ) -> AppResult<ApiResponse<RideResponse>> {
        let ride = self
            .lifecycle
            .transition(ride_id, Actor::Driver(driver_id), RideStatus::Completed, None)
            .await?;

        Ok(ApiResponse::success_with_message(
            ride.into(),
            "Ride completado".to_string(),
        ))
    }
}
