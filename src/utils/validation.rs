//! Utilidades de validación
//!
//! Este módulo contiene las funciones básicas de validación de texto
//! y la conversión de fechas que usa el esquema del formulario.

use std::borrow::Cow;

use chrono::{DateTime, Local, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

pub const REQUIRED_MESSAGE: &str = "Обязательно к заполнению";

lazy_static! {
    static ref DIGITS_REGEX: Regex = Regex::new(r"^[0-9]+$").unwrap();
    static ref DOTTED_DATE_REGEX: Regex =
        Regex::new(r"^([0-9]{2})\.([0-9]{2})\.([0-9]{4})$").unwrap();
}

fn rejection(code: &'static str, message: &'static str, value: &str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error.add_param("value".into(), &value.to_string());
    error
}

/// Validar que un campo obligatorio tenga contenido
///
/// Los espacios cuentan como contenido: solo la cadena vacía falla.
pub fn validate_required(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(rejection("required", REQUIRED_MESSAGE, value));
    }
    Ok(())
}

/// Validar que el valor contenga solo dígitos ASCII
pub fn validate_digits(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if !DIGITS_REGEX.is_match(value) {
        let mut error = rejection("regex", message, value);
        error.add_param("pattern".into(), &DIGITS_REGEX.as_str().to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar longitud exacta (en caracteres)
pub fn validate_exact_length(
    value: &str,
    length: usize,
    message: &'static str,
) -> Result<(), ValidationError> {
    let actual = value.chars().count();
    if actual != length {
        let mut error = rejection("length", message, value);
        error.add_param("equal".into(), &length);
        error.add_param("actual".into(), &actual);
        return Err(error);
    }
    Ok(())
}

/// Validar formato DD.MM.YYYY (solo la forma, no el calendario)
pub fn validate_dotted_date(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if !DOTTED_DATE_REGEX.is_match(value) {
        let mut error = rejection("regex", message, value);
        error.add_param("format".into(), &"DD.MM.YYYY".to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Validar y convertir string a datetime, tomando el día local
pub fn validate_datetime(value: &str) -> Result<NaiveDate, ValidationError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Local).date_naive())
        .map_err(|_| {
            let mut error = ValidationError::new("datetime");
            error.add_param("value".into(), &value.to_string());
            error.add_param("format".into(), &"RFC3339".to_string());
            error
        })
}

/// Interpretar la fecha de llegada tal como se guarda en el borrador
///
/// Acepta `YYYY-MM-DD` y, por compatibilidad con borradores antiguos,
/// un datetime RFC 3339. Cualquier otra cosa se considera ausente.
pub fn parse_arrival_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    validate_date(value)
        .or_else(|_| validate_datetime(value))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required() {
        assert!(validate_required("x").is_ok());
        assert!(validate_required(" ").is_ok());

        let error = validate_required("").unwrap_err();
        assert_eq!(error.code, "required");
        assert_eq!(error.message.as_deref(), Some(REQUIRED_MESSAGE));
    }

    #[test]
    fn test_validate_digits() {
        assert!(validate_digits("123", "число").is_ok());
        assert!(validate_digits("12a3", "число").is_err());
        assert!(validate_digits("", "число").is_err());
        assert!(validate_digits("١٢٣", "число").is_err());
    }

    #[test]
    fn test_validate_exact_length() {
        assert!(validate_exact_length("1234", 4, "4").is_ok());
        assert!(validate_exact_length("123", 4, "4").is_err());

        let error = validate_exact_length("12345", 4, "4").unwrap_err();
        assert_eq!(error.code, "length");
        assert_eq!(error.params["actual"], 5);
    }

    #[test]
    fn test_validate_dotted_date() {
        assert!(validate_dotted_date("01.02.2024", "fmt").is_ok());
        assert!(validate_dotted_date("01-02-2024", "fmt").is_err());
        assert!(validate_dotted_date("1.2.2024", "fmt").is_err());
        assert!(validate_dotted_date("01.02.2024 ", "fmt").is_err());
    }

    #[test]
    fn test_validate_date() {
        assert!(validate_date("2024-01-15").is_ok());
        assert!(validate_date("2024/01/15").is_err());
    }

    #[test]
    fn test_parse_arrival_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(parse_arrival_date("2024-01-15"), Some(expected));
        assert_eq!(parse_arrival_date(""), None);
        assert_eq!(parse_arrival_date("mañana"), None);
        assert!(parse_arrival_date("2024-01-15T12:00:00Z").is_some());
    }
}
