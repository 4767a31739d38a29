//! Repositorio de vehicles
//!
//! La reclamación de un vehículo para despacho es un UPDATE condicional
//! (compare-and-swap sobre status) para que dos rides concurrentes nunca
//! puedan quedarse con el mismo vehículo.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::vehicle::Vehicle;
use crate::utils::errors::AppResult;

/// Resultado de un intento de reclamación
#[derive(Debug, PartialEq, Eq)]
pub enum ClaimOutcome {
    Claimed,
    NotAvailable,
    NotFound,
}

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    /// Reclamar un vehículo disponible. Solo gana una de las transacciones
    /// concurrentes; el resto ve NotAvailable.
    pub async fn claim(conn: &mut PgConnection, id: Uuid) -> AppResult<ClaimOutcome> {
        let result = sqlx::query(
            "UPDATE vehicles SET status = 'in_use' WHERE id = $1 AND status = 'available'",
        )
        .bind(id)
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 1 {
            return Ok(ClaimOutcome::Claimed);
        }

        let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehicles WHERE id = $1)")
            .bind(id)
            .fetch_one(conn)
            .await?;

        if exists.0 {
            Ok(ClaimOutcome::NotAvailable)
        } else {
            Ok(ClaimOutcome::NotFound)
        }
    }

    /// Operación espejo de claim: devolver el vehículo a disponible.
    /// Atómica con la transición de estado que la provoca.
    pub async fn release(conn: &mut PgConnection, id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE vehicles SET status = 'available' WHERE id = $1 AND status = 'in_use'")
            .bind(id)
            .execute(conn)
            .await?;

        Ok(())
    }
}
