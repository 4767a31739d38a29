//! Notificaciones de ciclo de vida
//!
//! Cada transición aplicada emite un evento para los colaboradores de
//! notificación (email/SMS viven fuera de este servicio). La entrega es
//! best-effort: un fallo se registra y nunca revierte la transición.
//!
//! El sink se resuelve una sola vez al construir el estado de la
//! aplicación, no se sondea en cada llamada.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::config::environment::EnvironmentConfig;

/// Evento de ciclo de vida de un ride
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RideEvent {
    RideAssigned {
        ride_id: i64,
        driver_id: Uuid,
        scheduled_at: DateTime<Utc>,
    },
    RideStatusChanged {
        ride_id: i64,
        from: String,
        to: String,
    },
    RideCompleted {
        ride_id: i64,
        driver_id: Option<Uuid>,
        amount: Decimal,
    },
}

/// Interfaz del colaborador de notificaciones
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, event: &RideEvent) -> anyhow::Result<()>;
}

/// Sink que publica los eventos como JSON en un webhook configurado
pub struct WebhookNotificationSink {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotificationSink {
    pub fn new(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }
}

#[async_trait]
impl NotificationSink for WebhookNotificationSink {
    async fn notify(&self, event: &RideEvent) -> anyhow::Result<()> {
        let response = self.client.post(&self.url).json(event).send().await?;
        response.error_for_status()?;
        Ok(())
    }
}

/// Sink de desarrollo: solo deja traza del evento
pub struct LogNotificationSink;

#[async_trait]
impl NotificationSink for LogNotificationSink {
    async fn notify(&self, event: &RideEvent) -> anyhow::Result<()> {
        info!("📣 Evento de ride: {}", serde_json::to_string(event)?);
        Ok(())
    }
}

/// Resolver el sink según la configuración del entorno
pub fn sink_from_config(config: &EnvironmentConfig) -> std::sync::Arc<dyn NotificationSink> {
    match &config.notify_webhook_url {
        Some(url) => std::sync::Arc::new(WebhookNotificationSink::new(url.clone())),
        None => std::sync::Arc::new(LogNotificationSink),
    }
}
