//! Middleware de autenticación
//!
//! La identidad la emite el sistema externo como JWT; aquí se verifica el
//! token Bearer y se entrega `AuthUser { id, role }` a los handlers como
//! extractor. Los handlers que admiten acceso anónimo usan
//! `Option<AuthUser>`.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use uuid::Uuid;

use crate::models::auth::{AuthUser, UserRole};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{extract_token_from_header, verify_token, JwtConfig};

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?;

        let token = extract_token_from_header(auth_header)?;
        let claims = verify_token(token, &JwtConfig::from(&state.config))?;

        let id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Jwt("Token subject is not a valid user id".to_string()))?;
        let role = UserRole::from_str(&claims.role)
            .ok_or_else(|| AppError::Jwt(format!("Unknown role '{}'", claims.role)))?;

        Ok(AuthUser { id, role })
    }
}

/// Verificar que el usuario autenticado es admin
pub fn require_admin(user: &AuthUser) -> Result<(), AppError> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "This operation requires the admin role".to_string(),
        ))
    }
}

/// Verificar que el usuario autenticado es conductor
pub fn require_driver(user: &AuthUser) -> Result<(), AppError> {
    if user.is_driver() {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "This operation requires the driver role".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_admin() {
        let admin = AuthUser {
            id: Uuid::new_v4(),
            role: UserRole::Admin,
        };
        let driver = AuthUser {
            id: Uuid::new_v4(),
            role: UserRole::Driver,
        };
        assert!(require_admin(&admin).is_ok());
        assert!(require_admin(&driver).is_err());
    }

    #[test]
    fn test_require_driver() {
        let driver = AuthUser {
            id: Uuid::new_v4(),
            role: UserRole::Driver,
        };
        let customer = AuthUser {
            id: Uuid::new_v4(),
            role: UserRole::Customer,
        };
        assert!(require_driver(&driver).is_ok());
        assert!(require_driver(&customer).is_err());
    }
}
