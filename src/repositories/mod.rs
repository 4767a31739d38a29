//! Repositorios
//!
//! Acceso a datos por agregado. Las operaciones transaccionales reciben la
//! conexión de la transacción en curso (&mut PgConnection).

pub mod driver_repository;
pub mod ride_repository;
pub mod service_category_repository;
pub mod user_repository;
pub mod vehicle_repository;
