//! Modelo de Ride
//!
//! Este módulo contiene el struct Ride, los enums de su ciclo de vida y la
//! tabla canónica de transiciones de estado. Mapea exactamente al schema
//! PostgreSQL con primary key 'id'.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado del viaje - mapea al ENUM ride_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "ride_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RideStatus {
    Pending,
    Confirmed,
    Assigned,
    DriverEnRoute,
    PickupArrived,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
}

impl RideStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RideStatus::Pending => "pending",
            RideStatus::Confirmed => "confirmed",
            RideStatus::Assigned => "assigned",
            RideStatus::DriverEnRoute => "driver_en_route",
            RideStatus::PickupArrived => "pickup_arrived",
            RideStatus::InProgress => "in_progress",
            RideStatus::Completed => "completed",
            RideStatus::Cancelled => "cancelled",
            RideStatus::NoShow => "no_show",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(RideStatus::Pending),
            "confirmed" => Some(RideStatus::Confirmed),
            "assigned" => Some(RideStatus::Assigned),
            "driver_en_route" => Some(RideStatus::DriverEnRoute),
            "pickup_arrived" => Some(RideStatus::PickupArrived),
            "in_progress" => Some(RideStatus::InProgress),
            "completed" => Some(RideStatus::Completed),
            "cancelled" => Some(RideStatus::Cancelled),
            "no_show" => Some(RideStatus::NoShow),
            _ => None,
        }
    }

    /// Transiciones salientes permitidas desde este estado.
    /// Tabla única para todos los roles; la autorización por rol se aplica
    /// por separado en el servicio de ciclo de vida.
    pub fn allowed_transitions(&self) -> &'static [RideStatus] {
        match self {
            RideStatus::Pending => &[
                RideStatus::Confirmed,
                RideStatus::Assigned,
                RideStatus::Cancelled,
            ],
            RideStatus::Confirmed => &[
                RideStatus::Assigned,
                RideStatus::DriverEnRoute,
                RideStatus::Cancelled,
            ],
            RideStatus::Assigned => &[
                RideStatus::Confirmed,
                RideStatus::DriverEnRoute,
                RideStatus::Cancelled,
            ],
            RideStatus::DriverEnRoute => &[RideStatus::PickupArrived, RideStatus::Cancelled],
            RideStatus::PickupArrived => &[
                RideStatus::InProgress,
                RideStatus::NoShow,
                RideStatus::Cancelled,
            ],
            RideStatus::InProgress => &[RideStatus::Completed, RideStatus::Cancelled],
            // Estados terminales: sin salidas
            RideStatus::Completed | RideStatus::Cancelled | RideStatus::NoShow => &[],
        }
    }

    pub fn can_transition_to(&self, to: RideStatus) -> bool {
        self.allowed_transitions().contains(&to)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RideStatus::Completed | RideStatus::Cancelled | RideStatus::NoShow
        )
    }

    /// Estados que ocupan el calendario a efectos de disponibilidad
    pub fn blocks_scheduling(&self) -> bool {
        matches!(
            self,
            RideStatus::Pending | RideStatus::Assigned | RideStatus::Confirmed
        )
    }
}

impl std::fmt::Display for RideStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tipo de servicio - mapea al ENUM service_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "service_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Medical,
    General,
}

/// Tipo de pago - mapea al ENUM payment_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "payment_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    Private,
    Waiver,
}

/// Ride principal - mapea exactamente a la tabla rides
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ride {
    pub id: i64,
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
    pub status: RideStatus,
    pub is_guest: bool,
    pub additional_notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATUSES: [RideStatus; 9] = [
        RideStatus::Pending,
        RideStatus::Confirmed,
        RideStatus::Assigned,
        RideStatus::DriverEnRoute,
        RideStatus::PickupArrived,
        RideStatus::InProgress,
        RideStatus::Completed,
        RideStatus::Cancelled,
        RideStatus::NoShow,
    ];

    #[test]
    fn test_pending_transitions() {
        assert!(RideStatus::Pending.can_transition_to(RideStatus::Confirmed));
        assert!(RideStatus::Pending.can_transition_to(RideStatus::Assigned));
        assert!(RideStatus::Pending.can_transition_to(RideStatus::Cancelled));
        assert!(!RideStatus::Pending.can_transition_to(RideStatus::InProgress));
        assert!(!RideStatus::Pending.can_transition_to(RideStatus::Completed));
        assert!(!RideStatus::Pending.can_transition_to(RideStatus::NoShow));
    }

    #[test]
    fn test_confirmed_and_assigned_transitions() {
        assert!(RideStatus::Confirmed.can_transition_to(RideStatus::Assigned));
        assert!(RideStatus::Confirmed.can_transition_to(RideStatus::DriverEnRoute));
        assert!(RideStatus::Confirmed.can_transition_to(RideStatus::Cancelled));
        assert!(!RideStatus::Confirmed.can_transition_to(RideStatus::Confirmed));
        assert!(!RideStatus::Confirmed.can_transition_to(RideStatus::Pending));

        assert!(RideStatus::Assigned.can_transition_to(RideStatus::Confirmed));
        assert!(RideStatus::Assigned.can_transition_to(RideStatus::DriverEnRoute));
        assert!(RideStatus::Assigned.can_transition_to(RideStatus::Cancelled));
        assert!(!RideStatus::Assigned.can_transition_to(RideStatus::Completed));
    }

    #[test]
    fn test_progress_transitions() {
        assert!(RideStatus::DriverEnRoute.can_transition_to(RideStatus::PickupArrived));
        assert!(!RideStatus::DriverEnRoute.can_transition_to(RideStatus::InProgress));

        assert!(RideStatus::PickupArrived.can_transition_to(RideStatus::InProgress));
        assert!(RideStatus::PickupArrived.can_transition_to(RideStatus::NoShow));
        assert!(!RideStatus::PickupArrived.can_transition_to(RideStatus::Completed));

        assert!(RideStatus::InProgress.can_transition_to(RideStatus::Completed));
        assert!(RideStatus::InProgress.can_transition_to(RideStatus::Cancelled));
        assert!(!RideStatus::InProgress.can_transition_to(RideStatus::NoShow));
    }

    #[test]
    fn test_terminal_states_have_no_exits() {
        for terminal in [
            RideStatus::Completed,
            RideStatus::Cancelled,
            RideStatus::NoShow,
        ] {
            assert!(terminal.is_terminal());
            for target in ALL_STATUSES {
                assert!(
                    !terminal.can_transition_to(target),
                    "{} should not transition to {}",
                    terminal,
                    target
                );
            }
        }
    }

    #[test]
    fn test_no_state_skipping() {
        // Un viaje nunca salta directamente de intake a ejecución
        assert!(!RideStatus::Pending.can_transition_to(RideStatus::DriverEnRoute));
        assert!(!RideStatus::Pending.can_transition_to(RideStatus::PickupArrived));
        assert!(!RideStatus::Confirmed.can_transition_to(RideStatus::PickupArrived));
        assert!(!RideStatus::Assigned.can_transition_to(RideStatus::InProgress));
    }

    #[test]
    fn test_blocks_scheduling() {
        assert!(RideStatus::Pending.blocks_scheduling());
        assert!(RideStatus::Confirmed.blocks_scheduling());
        assert!(RideStatus::Assigned.blocks_scheduling());
        assert!(!RideStatus::DriverEnRoute.blocks_scheduling());
        assert!(!RideStatus::Completed.blocks_scheduling());
        assert!(!RideStatus::Cancelled.blocks_scheduling());
    }

    #[test]
    fn test_status_round_trip() {
        for status in ALL_STATUSES {
            assert_eq!(RideStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(RideStatus::from_str("unknown"), None);
    }
}
