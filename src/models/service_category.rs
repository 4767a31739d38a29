//! Modelo de ServiceCategory
//!
//! Categorías de transporte configuradas (ambulatory, wheelchair, ...) con
//! su tarifa base. Solo lectura desde el core de reservas.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ride::ServiceType;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ServiceCategory {
    pub id: i32,
    pub name: String,
    pub service_type: ServiceType,
    pub base_price: Decimal,
    pub price_per_mile: Decimal,
    pub is_active: bool,
}
