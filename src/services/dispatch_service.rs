//! Coordinador de despacho
//!
//! Asignación de conductor y vehículo a un ride en una sola unidad
//! atómica: fila del ride bloqueada, perfil del conductor verificado y
//! reclamación del vehículo por compare-and-swap. Si el vehículo ya está
//! en uso la transacción se revierte sin tocar el ride.

use sqlx::PgPool;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

use crate::models::ride::{Ride, RideStatus};
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::ride_repository::RideRepository;
use crate::repositories::vehicle_repository::{ClaimOutcome, VehicleRepository};
use crate::services::notification_service::{NotificationSink, RideEvent};
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct DispatchService {
    pool: PgPool,
    notifier: Arc<dyn NotificationSink>,
}

impl DispatchService {
    pub fn new(pool: PgPool, notifier: Arc<dyn NotificationSink>) -> Self {
        Self { pool, notifier }
    }

    /// Asignar conductor y vehículo. Acepta rides en PENDING o CONFIRMED,
    /// y en ASSIGNED para reasignación (cambio de conductor o vehículo).
    pub async fn assign(
        &self,
        ride_id: i64,
        driver_id: Uuid,
        vehicle_id: Uuid,
    ) -> AppResult<Ride> {
        let mut tx = self.pool.begin().await?;

        let mut ride = RideRepository::find_for_update(&mut *tx, ride_id)
            .await?
            .ok_or_else(|| not_found_error("Ride", &ride_id.to_string()))?;

        let from = ride.status;
        let assignable = matches!(
            from,
            RideStatus::Pending | RideStatus::Confirmed | RideStatus::Assigned
        );
        if !assignable {
            return Err(AppError::InvalidStateTransition {
                from,
                to: RideStatus::Assigned,
            });
        }

        DriverRepository::find_active_profile(&mut *tx, driver_id)
            .await?
            .ok_or_else(|| not_found_error("Driver", &driver_id.to_string()))?;

        // CAS sobre el vehículo: si falla, nada del ride se ha tocado
        match VehicleRepository::claim(&mut *tx, vehicle_id).await? {
            ClaimOutcome::Claimed => {}
            ClaimOutcome::NotAvailable => {
                return Err(AppError::Conflict(format!(
                    "Vehicle '{}' is not available",
                    vehicle_id
                )));
            }
            ClaimOutcome::NotFound => {
                return Err(not_found_error("Vehicle", &vehicle_id.to_string()));
            }
        }

        // En reasignación, liberar el vehículo anterior
        if let Some(previous) = ride.vehicle_id {
            if previous != vehicle_id {
                VehicleRepository::release(&mut *tx, previous).await?;
            }
        }

        ride.driver_id = Some(driver_id);
        ride.vehicle_id = Some(vehicle_id);
        ride.status = RideStatus::Assigned;
        let updated = RideRepository::persist_transition(&mut *tx, &ride).await?;
        tx.commit().await?;

        let event = RideEvent::RideAssigned {
            ride_id: updated.id,
            driver_id,
            scheduled_at: updated.scheduled_at,
        };
        if let Err(e) = self.notifier.notify(&event).await {
            warn!(
                "⚠️ Fallo notificando asignación del ride {}: {}",
                updated.id, e
            );
        }

        Ok(updated)
    }
}
