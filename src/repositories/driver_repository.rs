//! Repositorio de conductores

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::driver::DriverProfile;
use crate::utils::errors::AppResult;

pub struct DriverRepository {
    pool: PgPool,
}

impl DriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_profile(&self, user_id: Uuid) -> AppResult<Option<DriverProfile>> {
        let profile =
            sqlx::query_as::<_, DriverProfile>("SELECT * FROM drivers WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(profile)
    }

    /// Perfil activo de un usuario con rol driver, dentro de la transacción
    /// de asignación
    pub async fn find_active_profile(
        conn: &mut PgConnection,
        user_id: Uuid,
    ) -> AppResult<Option<DriverProfile>> {
        let profile = sqlx::query_as::<_, DriverProfile>(
            r#"
            SELECT d.* FROM drivers d
            JOIN users u ON u.id = d.user_id
            WHERE d.user_id = $1 AND d.is_active = TRUE AND u.role = 'driver'
            "#,
        )
        .bind(user_id)
        .fetch_optional(conn)
        .await?;

        Ok(profile)
    }

    /// Contador de viajes completados del conductor; se incrementa en la
    /// misma transacción que la transición a COMPLETED
    pub async fn increment_completed_trips(
        conn: &mut PgConnection,
        user_id: Uuid,
    ) -> AppResult<()> {
        sqlx::query("UPDATE drivers SET completed_trips = completed_trips + 1 WHERE user_id = $1")
            .bind(user_id)
            .execute(conn)
            .await?;

        Ok(())
    }
}
