//! Repositorio de rides
//!
//! Acceso SQL a la tabla rides. Las operaciones que participan en las rutas
//! calientes (reserva, transiciones de estado) reciben la conexión de la
//! transacción en curso para que la comprobación y la escritura sean
//! atómicas.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::ride::{PaymentType, Ride, RideStatus, ServiceType};
use crate::utils::errors::{AppError, AppResult};

/// Datos de inserción de un ride nuevo (siempre entra en PENDING)
#[derive(Debug)]
pub struct NewRide {
    pub customer_id: Option<Uuid>,
    pub passenger_name: String,
    pub passenger_phone: String,
    pub pickup_address: String,
    pub dropoff_address: String,
    pub distance_miles: rust_decimal::Decimal,
    pub duration_minutes: Option<i32>,
    pub service_category_id: i32,
    pub service_type: ServiceType,
    pub payment_type: PaymentType,
    pub base_price: rust_decimal::Decimal,
    pub scheduled_at: DateTime<Utc>,
    pub is_guest: bool,
    pub additional_notes: String,
}

pub struct RideRepository {
    pool: PgPool,
}

impl RideRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Ride>> {
        let ride = sqlx::query_as::<_, Ride>("SELECT * FROM rides WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(ride)
    }

    pub async fn list_by_status(&self, status: RideStatus) -> AppResult<Vec<Ride>> {
        let rides = sqlx::query_as::<_, Ride>(
            "SELECT * FROM rides WHERE status = $1 ORDER BY scheduled_at ASC",
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(rides)
    }

    /// Viajes abiertos (no terminales) ordenados por salida programada
    pub async fn list_active(&self) -> AppResult<Vec<Ride>> {
        let rides = sqlx::query_as::<_, Ride>(
            r#"
            SELECT * FROM rides
            WHERE status NOT IN ('completed', 'cancelled', 'no_show')
            ORDER BY scheduled_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rides)
    }

    /// Viajes abiertos (no terminales) asignados a un conductor
    pub async fn list_open_by_driver(&self, driver_id: Uuid) -> AppResult<Vec<Ride>> {
        let rides = sqlx::query_as::<_, Ride>(
            r#"
            SELECT * FROM rides
            WHERE driver_id = $1
              AND status NOT IN ('completed', 'cancelled', 'no_show')
            ORDER BY scheduled_at ASC
            "#,
        )
        .bind(driver_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rides)
    }

    /// Cargar y bloquear la fila del ride dentro de la transacción en curso.
    /// Serializa las actualizaciones concurrentes sobre el mismo ride.
    pub async fn find_for_update(conn: &mut PgConnection, id: i64) -> AppResult<Option<Ride>> {
        let ride = sqlx::query_as::<_, Ride>("SELECT * FROM rides WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(conn)
            .await?;

        Ok(ride)
    }

    pub async fn insert(conn: &mut PgConnection, new_ride: NewRide) -> AppResult<Ride> {
        let ride = sqlx::query_as::<_, Ride>(
            r#"
            INSERT INTO rides (
                customer_id, passenger_name, passenger_phone,
                pickup_address, dropoff_address, distance_miles, duration_minutes,
                service_category_id, service_type, payment_type, base_price,
                scheduled_at, status, is_guest, additional_notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, 'pending', $13, $14)
            RETURNING *
            "#,
        )
        .bind(new_ride.customer_id)
        .bind(new_ride.passenger_name)
        .bind(new_ride.passenger_phone)
        .bind(new_ride.pickup_address)
        .bind(new_ride.dropoff_address)
        .bind(new_ride.distance_miles)
        .bind(new_ride.duration_minutes)
        .bind(new_ride.service_category_id)
        .bind(new_ride.service_type)
        .bind(new_ride.payment_type)
        .bind(new_ride.base_price)
        .bind(new_ride.scheduled_at)
        .bind(new_ride.is_guest)
        .bind(new_ride.additional_notes)
        .fetch_one(conn)
        .await?;

        Ok(ride)
    }

    /// Persistir el resultado de una transición de estado.
    /// Escribe todos los campos que una transición puede tocar.
    pub async fn persist_transition(conn: &mut PgConnection, ride: &Ride) -> AppResult<Ride> {
        let updated = sqlx::query_as::<_, Ride>(
            r#"
            UPDATE rides
            SET status = $2,
                driver_id = $3,
                vehicle_id = $4,
                final_price = $5,
                actual_pickup_at = $6,
                actual_dropoff_at = $7,
                additional_notes = $8,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(ride.id)
        .bind(ride.status)
        .bind(ride.driver_id)
        .bind(ride.vehicle_id)
        .bind(ride.final_price)
        .bind(ride.actual_pickup_at)
        .bind(ride.actual_dropoff_at)
        .bind(&ride.additional_notes)
        .fetch_one(conn)
        .await?;

        Ok(updated)
    }

    /// Cuántos rides que ocupan calendario caen dentro de la ventana dada
    pub async fn count_blocking_in_window(
        conn: &mut PgConnection,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> AppResult<i64> {
        let row: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM rides
            WHERE scheduled_at >= $1 AND scheduled_at < $2
              AND status IN ('pending', 'assigned', 'confirmed')
            "#,
        )
        .bind(window_start)
        .bind(window_end)
        .fetch_one(conn)
        .await?;

        Ok(row.0)
    }

    /// Cuántos rides del mismo cliente caen dentro de la ventana dada
    pub async fn count_customer_blocking_in_window(
        conn: &mut PgConnection,
        customer_id: Uuid,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> AppResult<i64> {
        let row: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM rides
            WHERE customer_id = $1
              AND scheduled_at >= $2 AND scheduled_at < $3
              AND status IN ('pending', 'assigned', 'confirmed')
            "#,
        )
        .bind(customer_id)
        .bind(window_start)
        .bind(window_end)
        .fetch_one(conn)
        .await?;

        Ok(row.0)
    }

    /// Reservar el día para un ride guest. La primary key sobre ride_date es
    /// el respaldo de unicidad de la política de un guest por día.
    pub async fn reserve_guest_day(
        conn: &mut PgConnection,
        ride_date: NaiveDate,
        ride_id: i64,
    ) -> AppResult<()> {
        sqlx::query("INSERT INTO guest_ride_days (ride_date, ride_id) VALUES ($1, $2)")
            .bind(ride_date)
            .bind(ride_id)
            .execute(conn)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    AppError::Conflict("date fully booked".to_string())
                }
                _ => AppError::Database(e),
            })?;

        Ok(())
    }

    /// Liberar la reserva de día guest cuando el ride llega a estado terminal
    pub async fn release_guest_day(conn: &mut PgConnection, ride_id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM guest_ride_days WHERE ride_id = $1")
            .bind(ride_id)
            .execute(conn)
            .await?;

        Ok(())
    }
}
