//! Core de reservas y despacho de transporte a demanda
//!
//! Intake de reservas (autenticadas y guest), tarifas por banda horaria y
//! distancia, máquina de estados del ciclo de vida del ride y coordinación
//! de despacho de conductores y vehículos.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::cors::cors_middleware;
use crate::state::AppState;

/// Construir el router completo de la aplicación
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/rides", routes::ride_routes::create_ride_router())
        .nest(
            "/api/admin/rides",
            routes::admin_ride_routes::create_admin_ride_router(),
        )
        .nest(
            "/api/driver/rides",
            routes::driver_ride_routes::create_driver_ride_router(),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors_middleware())
        .with_state(state)
}

/// Health check
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "service": "ride-dispatch",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
