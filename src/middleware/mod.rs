//! Middleware del sistema
//!
//! Este módulo contiene el middleware para autenticación y CORS.

pub mod auth_middleware;
pub mod cors;

pub use auth_middleware::*;
pub use cors::*;
