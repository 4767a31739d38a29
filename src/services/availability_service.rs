//! Libro de disponibilidad
//!
//! Comprueba conflictos de agenda antes de crear una reserva. Las reservas
//! guest bloquean el día natural completo (una sola por día, política de
//! vehículo único); las reservas de clientes autenticados bloquean una
//! ventana de ±2 horas para el mismo cliente.
//!
//! La comprobación debe ejecutarse dentro de la misma transacción que el
//! INSERT posterior; el lock consultivo de Postgres serializa las reservas
//! que compiten por la misma clave (día guest o cliente).

use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc};
use sqlx::PgConnection;
use uuid::Uuid;

use crate::repositories::ride_repository::RideRepository;
use crate::utils::errors::AppResult;

/// Ventana de conflicto para clientes autenticados: ±2 horas
pub const CUSTOMER_WINDOW_HOURS: i64 = 2;

/// Espacios de claves para pg_advisory_xact_lock(int, int)
const GUEST_LOCK_SPACE: i32 = 1;
const CUSTOMER_LOCK_SPACE: i32 = 2;

/// Tipo de reserva a comprobar
#[derive(Debug, Clone, Copy)]
pub enum BookingKind {
    Guest,
    Customer(Uuid),
}

/// Resultado de la comprobación de disponibilidad
#[derive(Debug, Clone)]
pub struct ConflictOutcome {
    pub available: bool,
    pub reason: Option<String>,
}

impl ConflictOutcome {
    fn available() -> Self {
        Self {
            available: true,
            reason: None,
        }
    }

    fn blocked(reason: &str) -> Self {
        Self {
            available: false,
            reason: Some(reason.to_string()),
        }
    }
}

/// Fecha natural local de un instante programado
pub fn local_ride_date(scheduled_at: DateTime<Utc>) -> NaiveDate {
    scheduled_at.with_timezone(&Local).date_naive()
}

/// Límites [inicio, fin) del día natural local que contiene el instante dado
pub fn guest_day_window(scheduled_at: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let date = local_ride_date(scheduled_at);
    (local_midnight(date), local_midnight(date + Duration::days(1)))
}

fn local_midnight(date: NaiveDate) -> DateTime<Utc> {
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .expect("midnight is a valid time of day");
    match Local.from_local_datetime(&midnight) {
        chrono::LocalResult::Single(dt) | chrono::LocalResult::Ambiguous(dt, _) => {
            dt.with_timezone(&Utc)
        }
        // Medianoche inexistente por cambio horario: se toma la UTC
        chrono::LocalResult::None => Utc
            .from_utc_datetime(&midnight)
            .with_timezone(&Local)
            .with_timezone(&Utc),
    }
}

/// Ventana [inicio, fin) de ±2 horas alrededor del instante dado
pub fn customer_window(scheduled_at: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    (
        scheduled_at - Duration::hours(CUSTOMER_WINDOW_HOURS),
        scheduled_at + Duration::hours(CUSTOMER_WINDOW_HOURS),
    )
}

/// Clave de lock consultivo que serializa las reservas en competencia
pub fn advisory_lock_key(kind: &BookingKind, scheduled_at: DateTime<Utc>) -> (i32, i32) {
    match kind {
        BookingKind::Guest => {
            let days = local_ride_date(scheduled_at)
                .signed_duration_since(NaiveDate::from_ymd_opt(1970, 1, 1).expect("epoch"))
                .num_days();
            (GUEST_LOCK_SPACE, days as i32)
        }
        BookingKind::Customer(customer_id) => {
            let bytes = customer_id.as_bytes();
            let key = i32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
            (CUSTOMER_LOCK_SPACE, key)
        }
    }
}

/// Tomar el lock consultivo de la transacción para la clave de reserva.
/// Se libera solo al terminar la transacción.
pub async fn acquire_booking_lock(
    conn: &mut PgConnection,
    kind: &BookingKind,
    scheduled_at: DateTime<Utc>,
) -> AppResult<()> {
    let (space, key) = advisory_lock_key(kind, scheduled_at);
    sqlx::query("SELECT pg_advisory_xact_lock($1, $2)")
        .bind(space)
        .bind(key)
        .execute(conn)
        .await?;

    Ok(())
}

/// Comprobar si la reserva entra en conflicto con la agenda existente.
/// Solo cuentan los rides en estado que ocupa calendario
/// (PENDING, ASSIGNED, CONFIRMED).
pub async fn check_conflict(
    conn: &mut PgConnection,
    kind: &BookingKind,
    scheduled_at: DateTime<Utc>,
) -> AppResult<ConflictOutcome> {
    match kind {
        BookingKind::Guest => {
            let (start, end) = guest_day_window(scheduled_at);
            let conflicts = RideRepository::count_blocking_in_window(conn, start, end).await?;
            if conflicts > 0 {
                Ok(ConflictOutcome::blocked("date fully booked"))
            } else {
                Ok(ConflictOutcome::available())
            }
        }
        BookingKind::Customer(customer_id) => {
            let (start, end) = customer_window(scheduled_at);
            let conflicts =
                RideRepository::count_customer_blocking_in_window(conn, *customer_id, start, end)
                    .await?;
            if conflicts > 0 {
                Ok(ConflictOutcome::blocked("conflicting ride"))
            } else {
                Ok(ConflictOutcome::available())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_guest_day_window_contains_instant() {
        let scheduled = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
        let (start, end) = guest_day_window(scheduled);
        assert!(start <= scheduled && scheduled < end);
        // Medianoche local en ambos extremos
        assert_eq!(start.with_timezone(&Local).time().hour(), 0);
        assert_eq!(end.with_timezone(&Local).time().hour(), 0);
        assert_eq!(
            local_ride_date(start) + Duration::days(1),
            local_ride_date(end)
        );
    }

    #[test]
    fn test_same_day_instants_share_window() {
        let morning = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
        let window = guest_day_window(morning);
        let later_same_day = morning + Duration::hours(8);
        assert!(window.0 <= later_same_day && later_same_day < window.1);
    }

    #[test]
    fn test_customer_window_is_four_hours() {
        let scheduled = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let (start, end) = customer_window(scheduled);
        assert_eq!(end - start, Duration::hours(4));
        assert_eq!(scheduled - start, Duration::hours(2));

        // 11:00 y 13:59 caen dentro; 14:00 ya no
        assert!(start <= scheduled - Duration::hours(1));
        assert!(scheduled + Duration::minutes(119) < end);
        assert!(scheduled + Duration::hours(2) >= end);
    }

    #[test]
    fn test_advisory_lock_keys_are_stable() {
        let scheduled = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let (space_a, key_a) = advisory_lock_key(&BookingKind::Guest, scheduled);
        let (space_b, key_b) =
            advisory_lock_key(&BookingKind::Guest, scheduled + Duration::minutes(30));
        assert_eq!((space_a, key_a), (space_b, key_b));

        let customer = Uuid::new_v4();
        let (space_c, key_c) = advisory_lock_key(&BookingKind::Customer(customer), scheduled);
        let (space_d, key_d) = advisory_lock_key(
            &BookingKind::Customer(customer),
            scheduled + Duration::days(3),
        );
        assert_eq!((space_c, key_c), (space_d, key_d));
        assert_ne!(space_a, space_c);
    }
}
