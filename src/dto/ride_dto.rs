//! DTOs de rides
//!
//! Requests de reserva (autenticada y guest), comprobación de
//! disponibilidad, operaciones admin y la response pública del ride.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::ride::{PaymentType, Ride, RideStatus, ServiceType};

/// Request de reserva autenticada. El nombre y teléfono del pasajero se
/// copian de la cuenta del cliente.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRideRequest {
    #[validate(length(min = 5, max = 255))]
    pub pickup_address: String,

    #[validate(length(min = 5, max = 255))]
    pub dropoff_address: String,

    /// Distancia estimada en kilómetros; si falta se aplica la distancia
    /// por defecto del motor de tarifas
    #[validate(custom = "crate::utils::validation::validate_positive_decimal")]
    pub distance_km: Option<Decimal>,

    #[validate(range(min = 1, max = 1440))]
    pub duration_minutes: Option<i32>,

    pub service_category_id: i32,

    pub payment_type: PaymentType,

    #[validate(custom = "crate::utils::validation::validate_future_datetime")]
    pub scheduled_at: DateTime<Utc>,

    #[validate(length(max = 2000))]
    pub additional_notes: Option<String>,
}

/// Request de reserva guest: sin cuenta, el pasajero se identifica por
/// nombre y teléfono
#[derive(Debug, Deserialize, Validate)]
pub struct CreateGuestRideRequest {
    #[validate(length(min = 2, max = 100))]
    pub passenger_name: String,

    #[validate(custom = "crate::utils::validation::validate_phone")]
    pub passenger_phone: String,

    #[validate(length(min = 5, max = 255))]
    pub pickup_address: String,

    #[validate(length(min = 5, max = 255))]
    pub dropoff_address: String,

    #[validate(custom = "crate::utils::validation::validate_positive_decimal")]
    pub distance_km: Option<Decimal>,

    #[validate(range(min = 1, max = 1440))]
    pub duration_minutes: Option<i32>,

    pub service_category_id: i32,

    pub payment_type: PaymentType,

    #[validate(custom = "crate::utils::validation::validate_future_datetime")]
    pub scheduled_at: DateTime<Utc>,

    #[validate(length(max = 2000))]
    pub additional_notes: Option<String>,
}

/// Request de comprobación de disponibilidad (dry-run de la reserva)
#[derive(Debug, Deserialize, Validate)]
pub struct CheckAvailabilityRequest {
    #[validate(custom = "crate::utils::validation::validate_future_datetime")]
    pub scheduled_at: DateTime<Utc>,
}

/// Response de disponibilidad
#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Aprobación admin: fija el precio final del viaje
#[derive(Debug, Deserialize, Validate)]
pub struct ApproveRideRequest {
    pub price: Decimal,

    #[validate(length(max = 2000))]
    pub note: Option<String>,
}

/// Rechazo admin: el motivo es obligatorio y queda en el historial
#[derive(Debug, Deserialize, Validate)]
pub struct DeclineRideRequest {
    #[validate(length(min = 3, max = 2000))]
    pub reason: String,
}

/// Cambio de estado solicitado por admin o conductor
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRideStatusRequest {
    pub status: RideStatus,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// Filtro de listado admin
#[derive(Debug, Deserialize)]
pub struct RideListFilters {
    pub status: Option<RideStatus>,
}

/// Response de ride para la API
#[derive(Debug, Serialize)]
pub struct RideResponse {
    pub id: i64,
    pub status: RideStatus,
    pub customer_id: Option<Uuid>,
    pub driver_id: Option<Uuid>,
    pub vehicle_id: Option<Uuid>,
    pub passenger_name: String,
    pub passenger_phone: String,
    pub pickup_address: String,
    pub dropoff_address: String,
    pub distance_miles: Decimal,
    pub duration_minutes: Option<i32>,
    pub service_category_id: i32,
    pub service_type: ServiceType,
    pub payment_type: PaymentType,
    pub base_price: Decimal,
    pub final_price: Option<Decimal>,
    pub scheduled_at: DateTime<Utc>,
    pub actual_pickup_at: Option<DateTime<Utc>>,
    pub actual_dropoff_at: Option<DateTime<Utc>>,
    pub is_guest: bool,
    pub additional_notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Ride> for RideResponse {
    fn from(ride: Ride) -> Self {
        Self {
            id: ride.id,
            status: ride.status,
            customer_id: ride.customer_id,
            driver_id: ride.driver_id,
            vehicle_id: ride.vehicle_id,
            passenger_name: ride.passenger_name,
            passenger_phone: ride.passenger_phone,
            pickup_address: ride.pickup_address,
            dropoff_address: ride.dropoff_address,
            distance_miles: ride.distance_miles,
            duration_minutes: ride.duration_minutes,
            service_category_id: ride.service_category_id,
            service_type: ride.service_type,
            payment_type: ride.payment_type,
            base_price: ride.base_price,
            final_price: ride.final_price,
            scheduled_at: ride.scheduled_at,
            actual_pickup_at: ride.actual_pickup_at,
            actual_dropoff_at: ride.actual_dropoff_at,
            is_guest: ride.is_guest,
            additional_notes: ride.additional_notes,
            created_at: ride.created_at,
            updated_at: ride.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn base_request() -> CreateGuestRideRequest {
        CreateGuestRideRequest {
            passenger_name: "Jane Doe".to_string(),
            passenger_phone: "5145550199".to_string(),
            pickup_address: "12 Main Street".to_string(),
            dropoff_address: "90 Oak Avenue".to_string(),
            distance_km: Some(Decimal::from(10)),
            duration_minutes: Some(25),
            service_category_id: 1,
            payment_type: PaymentType::Private,
            scheduled_at: Utc::now() + Duration::hours(6),
            additional_notes: None,
        }
    }

    #[test]
    fn test_valid_guest_request_passes() {
        assert!(base_request().validate().is_ok());
    }

    #[test]
    fn test_past_schedule_is_rejected() {
        let mut request = base_request();
        request.scheduled_at = Utc::now() - Duration::hours(1);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_bad_phone_is_rejected() {
        let mut request = base_request();
        request.passenger_phone = "123".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_zero_distance_is_rejected() {
        let mut request = base_request();
        request.distance_km = Some(Decimal::ZERO);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_missing_distance_is_allowed() {
        let mut request = base_request();
        request.distance_km = None;
        assert!(request.validate().is_ok());
    }
}
