//! Repositorio de categorías de servicio (solo lectura)

use sqlx::PgPool;

use crate::models::service_category::ServiceCategory;
use crate::utils::errors::AppResult;

pub struct ServiceCategoryRepository {
    pool: PgPool,
}

impl ServiceCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_active(&self, id: i32) -> AppResult<Option<ServiceCategory>> {
        let category = sqlx::query_as::<_, ServiceCategory>(
            "SELECT * FROM service_categories WHERE id = $1 AND is_active = TRUE",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }
}
