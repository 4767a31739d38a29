//! Modelo de perfil de conductor

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Perfil de conductor - mapea a la tabla drivers (1:1 con users)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DriverProfile {
    pub user_id: Uuid,
    pub license_number: String,
    pub completed_trips: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
