//! Esquema de validación del registro
//!
//! Cada campo es obligatorio; algunos tienen además una restricción de
//! forma. Gana la primera regla que falla, así que un número vacío se
//! reporta como ausente y no como mal formado.

use serde::Serialize;
use validator::{ValidationError, ValidationErrors};

use crate::models::registration::{FieldName, RegistrationRecord};
use crate::utils::validation::{
    validate_digits, validate_dotted_date, validate_exact_length, validate_required,
};

pub use crate::utils::validation::REQUIRED_MESSAGE;

pub const DIGITS_MESSAGE: &str = "Должно быть число";
pub const PASSPORT_SERIES_MESSAGE: &str = "Должно быть ровно 4 цифры";
pub const PASSPORT_NUMBER_MESSAGE: &str = "Должно быть ровно 6 цифр";
pub const ISSUE_DATE_MESSAGE: &str = "Дата должна быть в формате ДД.ММ.ГГГГ";

pub const PASSPORT_SERIES_LENGTH: usize = 4;
pub const PASSPORT_NUMBER_LENGTH: usize = 6;

/// Tipo de error de campo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldErrorKind {
    Missing,
    Malformed,
}

/// Error de un campo, listo para mostrarse junto a él
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub kind: FieldErrorKind,
    pub message: String,
}

impl From<&ValidationError> for FieldError {
    fn from(error: &ValidationError) -> Self {
        let kind = if error.code == "required" {
            FieldErrorKind::Missing
        } else {
            FieldErrorKind::Malformed
        };
        let message = error
            .message
            .as_ref()
            .map(|message| message.to_string())
            .unwrap_or_else(|| error.code.to_string());
        Self { kind, message }
    }
}

/// Validar un solo campo del registro
pub fn validate_field(record: &RegistrationRecord, field: FieldName) -> Result<(), ValidationError> {
    let value = match record.text(field) {
        Some(value) => value,
        None => {
            // La fecha de llegada solo exige presencia
            return match record.arrival_date {
                Some(_) => Ok(()),
                None => validate_required(""),
            };
        }
    };

    validate_required(value)?;

    match field {
        FieldName::VehicleNumber => validate_digits(value, DIGITS_MESSAGE),
        FieldName::PassportSeries => {
            validate_exact_length(value, PASSPORT_SERIES_LENGTH, PASSPORT_SERIES_MESSAGE)
        }
        FieldName::PassportNumber => {
            validate_exact_length(value, PASSPORT_NUMBER_LENGTH, PASSPORT_NUMBER_MESSAGE)
        }
        FieldName::IssueDate => validate_dotted_date(value, ISSUE_DATE_MESSAGE),
        _ => Ok(()),
    }
}

/// Error visible de un campo, si lo hay
pub fn check_field(record: &RegistrationRecord, field: FieldName) -> Option<FieldError> {
    validate_field(record, field)
        .err()
        .map(|error| FieldError::from(&error))
}

/// Validar el registro completo
pub fn validate_record(record: &RegistrationRecord) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let mut failed = false;

    for field in FieldName::ALL {
        if let Err(error) = validate_field(record, field) {
            errors.add(field.as_str(), error);
            failed = true;
        }
    }

    if failed {
        Err(errors)
    } else {
        Ok(())
    }
}
