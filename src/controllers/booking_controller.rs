//! Controller de reservas (intake)
//!
//! Valida la solicitud, resuelve la categoría de servicio, calcula la
//! tarifa base y crea el ride en PENDING. La comprobación de conflicto y
//! el INSERT se ejecutan dentro de la misma transacción, serializada por
//! el lock consultivo de la clave de reserva, para cerrar la carrera
//! check/insert.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::ride_dto::{
    AvailabilityResponse, CheckAvailabilityRequest, CreateGuestRideRequest, CreateRideRequest,
    RideResponse,
};
use crate::models::auth::{AuthUser, UserRole};
use crate::models::service_category::ServiceCategory;
use crate::repositories::ride_repository::{NewRide, RideRepository};
use crate::repositories::service_category_repository::ServiceCategoryRepository;
use crate::repositories::user_repository::UserRepository;
use crate::services::availability_service::{
    acquire_booking_lock, check_conflict, local_ride_date, BookingKind,
};
use crate::services::pricing_service;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct BookingController {
    pool: PgPool,
    users: UserRepository,
    categories: ServiceCategoryRepository,
    rides: RideRepository,
}

impl BookingController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            categories: ServiceCategoryRepository::new(pool.clone()),
            rides: RideRepository::new(pool.clone()),
            pool,
        }
    }

    /// Reserva autenticada: el pasajero es el titular de la cuenta
    pub async fn create(
        &self,
        customer_id: Uuid,
        request: CreateRideRequest,
    ) -> AppResult<ApiResponse<RideResponse>> {
        request.validate()?;

        let customer = self
            .users
            .find_by_id(customer_id)
            .await?
            .ok_or_else(|| not_found_error("Customer", &customer_id.to_string()))?;
        let category = self.load_category(request.service_category_id).await?;

        let distance_miles = request
            .distance_km
            .map(pricing_service::miles_from_km)
            .unwrap_or_else(pricing_service::default_distance_miles);
        let base_price = pricing_service::price(&category, distance_miles, request.scheduled_at);

        let kind = BookingKind::Customer(customer_id);
        let mut tx = self.pool.begin().await?;
        acquire_booking_lock(&mut *tx, &kind, request.scheduled_at).await?;

        let outcome = check_conflict(&mut *tx, &kind, request.scheduled_at).await?;
        if !outcome.available {
            return Err(AppError::Conflict(
                outcome.reason.unwrap_or_else(|| "conflicting ride".to_string()),
            ));
        }

        let ride = RideRepository::insert(
            &mut *tx,
            NewRide {
                customer_id: Some(customer_id),
                passenger_name: customer.full_name,
                passenger_phone: customer.phone,
                pickup_address: request.pickup_address,
                dropoff_address: request.dropoff_address,
                distance_miles,
                duration_minutes: request.duration_minutes,
                service_category_id: category.id,
                service_type: category.service_type,
                payment_type: request.payment_type,
                base_price,
                scheduled_at: request.scheduled_at,
                is_guest: false,
                additional_notes: request.additional_notes.unwrap_or_default(),
            },
        )
        .await?;
        tx.commit().await?;

        info!("🚗 Ride {} creado para cliente {}", ride.id, customer_id);
        Ok(ApiResponse::success_with_message(
            ride.into(),
            "Ride solicitado exitosamente".to_string(),
        ))
    }

    /// Reserva guest: pasajero identificado solo por nombre y teléfono.
    /// Además del conflicto de día completo, la fila de guest_ride_days
    /// garantiza la unicidad aunque dos requests lleguen a la vez.
    pub async fn create_guest(
        &self,
        request: CreateGuestRideRequest,
    ) -> AppResult<ApiResponse<RideResponse>> {
        request.validate()?;

        let category = self.load_category(request.service_category_id).await?;

        let distance_miles = request
            .distance_km
            .map(pricing_service::miles_from_km)
            .unwrap_or_else(pricing_service::default_distance_miles);
        let base_price = pricing_service::price(&category, distance_miles, request.scheduled_at);

        let kind = BookingKind::Guest;
        let mut tx = self.pool.begin().await?;
        acquire_booking_lock(&mut *tx, &kind, request.scheduled_at).await?;

        let outcome = check_conflict(&mut *tx, &kind, request.scheduled_at).await?;
        if !outcome.available {
            return Err(AppError::Conflict(
                outcome.reason.unwrap_or_else(|| "date fully booked".to_string()),
            ));
        }

        let ride = RideRepository::insert(
            &mut *tx,
            NewRide {
                customer_id: None,
                passenger_name: request.passenger_name,
                passenger_phone: request.passenger_phone,
                pickup_address: request.pickup_address,
                dropoff_address: request.dropoff_address,
                distance_miles,
                duration_minutes: request.duration_minutes,
                service_category_id: category.id,
                service_type: category.service_type,
                payment_type: request.payment_type,
                base_price,
                scheduled_at: request.scheduled_at,
                is_guest: true,
                additional_notes: request.additional_notes.unwrap_or_default(),
            },
        )
        .await?;
        RideRepository::reserve_guest_day(
            &mut *tx,
            local_ride_date(request.scheduled_at),
            ride.id,
        )
        .await?;
        tx.commit().await?;

        info!("🚗 Ride guest {} creado", ride.id);
        Ok(ApiResponse::success_with_message(
            ride.into(),
            "Ride solicitado exitosamente".to_string(),
        ))
    }

    /// Dry-run de la comprobación de disponibilidad. Con identidad se
    /// aplica la ventana de cliente; sin ella, la política guest.
    pub async fn check_availability(
        &self,
        identity: Option<AuthUser>,
        request: CheckAvailabilityRequest,
    ) -> AppResult<AvailabilityResponse> {
        request.validate()?;

        let kind = match identity {
            Some(user) => BookingKind::Customer(user.id),
            None => BookingKind::Guest,
        };

        let mut conn = self.pool.acquire().await?;
        let outcome = check_conflict(&mut *conn, &kind, request.scheduled_at).await?;

        Ok(AvailabilityResponse {
            available: outcome.available,
            reason: outcome.reason,
        })
    }

    /// Consultar un ride: su cliente, su conductor asignado o un admin
    pub async fn get(&self, ride_id: i64, user: &AuthUser) -> AppResult<RideResponse> {
        let ride = self
            .rides
            .find_by_id(ride_id)
            .await?
            .ok_or_else(|| not_found_error("Ride", &ride_id.to_string()))?;

        let allowed = match user.role {
            UserRole::Admin => true,
            UserRole::Driver => ride.driver_id == Some(user.id),
            UserRole::Customer => ride.customer_id == Some(user.id),
        };
        if !allowed {
            return Err(AppError::Forbidden(
                "You do not have access to this ride".to_string(),
            ));
        }

        Ok(ride.into())
    }

    async fn load_category(&self, id: i32) -> AppResult<ServiceCategory> {
        self.categories
            .find_active(id)
            .await?
            .ok_or_else(|| not_found_error("Service category", &id.to_string()))
    }
}
