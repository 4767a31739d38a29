//! Controller admin de rides
//!
//! Aprobación, rechazo, asignación de conductor/vehículo y cambios de
//! estado arbitrarios dentro de la tabla de transiciones.

use tracing::info;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::dispatch_dto::AssignDriverRequest;
use crate::dto::ride_dto::{
    ApproveRideRequest, DeclineRideRequest, RideListFilters, RideResponse, UpdateRideStatusRequest,
};
use crate::repositories::ride_repository::RideRepository;
use crate::services::dispatch_service::DispatchService;
use crate::services::ride_lifecycle_service::{Actor, RideLifecycleService};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct AdminRideController {
    lifecycle: RideLifecycleService,
    dispatch: DispatchService,
    rides: RideRepository,
}

impl AdminRideController {
    pub fn new(state: &AppState) -> Self {
        Self {
            lifecycle: RideLifecycleService::new(
                state.pool.clone(),
                state.notifier.clone(),
                state.invoices.clone(),
            ),
            dispatch: DispatchService::new(state.pool.clone(), state.notifier.clone()),
            rides: RideRepository::new(state.pool.clone()),
        }
    }

    /// PENDING -> CONFIRMED fijando el precio final
    pub async fn approve(
        &self,
        ride_id: i64,
        request: ApproveRideRequest,
    ) -> AppResult<ApiResponse<RideResponse>> {
        request.validate()?;
        let ride = self
            .lifecycle
            .approve(ride_id, request.price, request.note)
            .await?;

        info!("✅ Ride {} aprobado con precio {}", ride.id, request.price);
        Ok(ApiResponse::success_with_message(
            ride.into(),
            "Ride aprobado exitosamente".to_string(),
        ))
    }

    /// PENDING -> CANCELLED con motivo
    pub async fn decline(
        &self,
        ride_id: i64,
        request: DeclineRideRequest,
    ) -> AppResult<ApiResponse<RideResponse>> {
        request.validate()?;
        let ride = self.lifecycle.decline(ride_id, &request.reason).await?;

        info!("🚫 Ride {} rechazado", ride.id);
        Ok(ApiResponse::success_with_message(
            ride.into(),
            "Ride rechazado".to_string(),
        ))
    }

    /// Asignar conductor y vehículo vía el coordinador de despacho
    pub async fn assign(
        &self,
        ride_id: i64,
        request: AssignDriverRequest,
    ) -> AppResult<ApiResponse<RideResponse>> {
        request.validate()?;
        let ride = self
            .dispatch
            .assign(ride_id, request.driver_id, request.vehicle_id)
            .await?;

        info!(
            "🚚 Ride {} asignado a conductor {} con vehículo {}",
            ride.id, request.driver_id, request.vehicle_id
        );
        Ok(ApiResponse::success_with_message(
            ride.into(),
            "Conductor asignado exitosamente".to_string(),
        ))
    }

    /// Transición de estado arbitraria dentro de la tabla
    pub async fn update_status(
        &self,
        ride_id: i64,
        request: UpdateRideStatusRequest,
    ) -> AppResult<ApiResponse<RideResponse>> {
        request.validate()?;
        let ride = self
            .lifecycle
            .transition(ride_id, Actor::Admin, request.status, request.notes)
            .await?;

        Ok(ApiResponse::success(ride.into()))
    }

    /// Listado de rides, filtrable por estado
    pub async fn list(&self, filters: RideListFilters) -> AppResult<Vec<RideResponse>> {
        let rides = match filters.status {
            Some(status) => self.rides.list_by_status(status).await?,
            None => self.rides.list_active().await?,
        };

        Ok(rides.into_iter().map(RideResponse::from).collect())
    }
}
