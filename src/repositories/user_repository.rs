//! Repositorio de usuarios
//!
//! Los usuarios los escribe el sistema de identidad externo; aquí solo se
//! leen para copiar los datos del pasajero y verificar roles.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::auth::User;
use crate::utils::errors::AppResult;

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }
}
