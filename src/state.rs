//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Los colaboradores externos (notificaciones,
//! facturación) se resuelven una sola vez aquí, en construcción.

use sqlx::PgPool;
use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::services::invoice_service::{InvoiceGenerator, LogInvoiceGenerator};
use crate::services::notification_service::{sink_from_config, NotificationSink};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub notifier: Arc<dyn NotificationSink>,
    pub invoices: Arc<dyn InvoiceGenerator>,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        let notifier = sink_from_config(&config);
        Self {
            pool,
            config,
            notifier,
            invoices: Arc::new(LogInvoiceGenerator),
        }
    }
}
