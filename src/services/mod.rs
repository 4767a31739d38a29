//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación: tarifas,
//! disponibilidad, ciclo de vida del ride, despacho y los colaboradores
//! externos de notificación y facturación.

pub mod availability_service;
pub mod dispatch_service;
pub mod invoice_service;
pub mod notification_service;
pub mod pricing_service;
pub mod ride_lifecycle_service;
