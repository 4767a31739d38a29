//! DTOs de despacho

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Asignación de conductor y vehículo a un ride
#[derive(Debug, Deserialize, Validate)]
pub struct AssignDriverRequest {
    pub driver_id: Uuid,
    pub vehicle_id: Uuid,
}
