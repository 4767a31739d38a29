//! Generación de facturas
//!
//! Se invoca tras COMPLETED. Si falla, el ride queda completado sin
//! factura y un operador la reintenta fuera de este core.

use async_trait::async_trait;
use tracing::info;

use crate::models::ride::Ride;

/// Interfaz del colaborador de facturación
#[async_trait]
pub trait InvoiceGenerator: Send + Sync {
    /// Devuelve la referencia de la factura generada
    async fn on_completed(&self, ride: &Ride) -> anyhow::Result<String>;
}

/// Generador local: asigna una referencia y deja traza.
/// La renderización del documento vive en el colaborador externo.
pub struct LogInvoiceGenerator;

#[async_trait]
impl InvoiceGenerator for LogInvoiceGenerator {
    async fn on_completed(&self, ride: &Ride) -> anyhow::Result<String> {
        let amount = ride.final_price.unwrap_or(ride.base_price);
        let reference = format!("INV-{}", ride.id);
        info!(
            "🧾 Factura {} para ride {} por {}",
            reference, ride.id, amount
        );
        Ok(reference)
    }
}
