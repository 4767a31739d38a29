//! Utilidades de validación
//!
//! Funciones custom para los derives de validator y helpers de conversión.

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidationError;

lazy_static! {
    // Dígitos con separadores habituales, 10-15 dígitos efectivos
    static ref PHONE_RE: Regex =
        Regex::new(r"^\+?[0-9][0-9 \-\.\(\)]{8,20}$").expect("valid phone regex");
}

/// Validar que el instante programado sea estrictamente futuro
pub fn validate_future_datetime(value: &DateTime<Utc>) -> Result<(), ValidationError> {
    if *value <= Utc::now() {
        let mut error = ValidationError::new("future_datetime");
        error.add_param("value".into(), &value.to_rfc3339());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de teléfono
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    if !PHONE_RE.is_match(value) || !(10..=15).contains(&digits) {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un decimal sea estrictamente positivo
pub fn validate_positive_decimal(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_validate_future_datetime() {
        assert!(validate_future_datetime(&(Utc::now() + Duration::hours(1))).is_ok());
        assert!(validate_future_datetime(&(Utc::now() - Duration::seconds(5))).is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("5145550199").is_ok());
        assert!(validate_phone("+1 514 555-0199").is_ok());
        assert!(validate_phone("(514) 555-0199").is_ok());
        assert!(validate_phone("123").is_err());
        assert!(validate_phone("not-a-phone").is_err());
        assert!(validate_phone("12345678901234567890123").is_err());
    }

    #[test]
    fn test_validate_positive_decimal() {
        assert!(validate_positive_decimal(&Decimal::from(5)).is_ok());
        assert!(validate_positive_decimal(&Decimal::ZERO).is_err());
        assert!(validate_positive_decimal(&Decimal::from(-3)).is_err());
    }
}
