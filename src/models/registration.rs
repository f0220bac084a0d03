//! Modelo de Registration
//!
//! Este módulo contiene el registro de vehículo y conductor que se edita en
//! el formulario, los nombres de campo tal como viajan en el borrador y el
//! registro finalizado que se muestra tras un envío válido.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::utils::errors::FormError;
use crate::utils::validation::parse_arrival_date;

/// Contenido del slot de borrador: nombre de campo -> valor
///
/// Es un objeto JSON arbitrario: las claves y valores que el formulario no
/// entiende se conservan al reescribir el borrador.
pub type DraftMapping = serde_json::Map<String, serde_json::Value>;

/// Campos editables del formulario
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FieldName {
    #[serde(rename = "auto_number")]
    VehicleNumber,
    #[serde(rename = "auto_type")]
    VehicleType,
    #[serde(rename = "date")]
    ArrivalDate,
    #[serde(rename = "fullname")]
    DriverFullName,
    #[serde(rename = "pass_series")]
    PassportSeries,
    #[serde(rename = "pass_number")]
    PassportNumber,
    #[serde(rename = "who_gived")]
    IssuingAuthority,
    #[serde(rename = "when_gived")]
    IssueDate,
}

impl FieldName {
    /// Orden de los campos en el formulario
    pub const ALL: [FieldName; 8] = [
        FieldName::VehicleNumber,
        FieldName::VehicleType,
        FieldName::ArrivalDate,
        FieldName::DriverFullName,
        FieldName::PassportSeries,
        FieldName::PassportNumber,
        FieldName::IssuingAuthority,
        FieldName::IssueDate,
    ];

    /// Nombre del campo en el borrador y en el registro mostrado
    pub fn as_str(self) -> &'static str {
        match self {
            FieldName::VehicleNumber => "auto_number",
            FieldName::VehicleType => "auto_type",
            FieldName::ArrivalDate => "date",
            FieldName::DriverFullName => "fullname",
            FieldName::PassportSeries => "pass_series",
            FieldName::PassportNumber => "pass_number",
            FieldName::IssuingAuthority => "who_gived",
            FieldName::IssueDate => "when_gived",
        }
    }

    /// Etiqueta visible del campo
    pub fn label(self) -> &'static str {
        match self {
            FieldName::VehicleNumber => "Гос-номер",
            FieldName::VehicleType => "Транспортное средство",
            FieldName::ArrivalDate => "Ориентировочная дата прибытия к покупателю",
            FieldName::DriverFullName => "ФИО",
            FieldName::PassportSeries => "Серия паспорта",
            FieldName::PassportNumber => "Номер паспорта",
            FieldName::IssuingAuthority => "Кем выдан",
            FieldName::IssueDate => "Когда выдан",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldName::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}

/// Registro en edición
///
/// Todos los campos de texto empiezan vacíos; la fecha de llegada empieza en
/// el día del montaje y puede quedar vacía si el calendario la borra.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRecord {
    #[serde(rename = "auto_number")]
    pub vehicle_number: String,
    #[serde(rename = "auto_type")]
    pub vehicle_type: String,
    #[serde(rename = "date")]
    pub arrival_date: Option<NaiveDate>,
    #[serde(rename = "fullname")]
    pub driver_full_name: String,
    #[serde(rename = "pass_series")]
    pub passport_series: String,
    #[serde(rename = "pass_number")]
    pub passport_number: String,
    #[serde(rename = "who_gived")]
    pub issuing_authority: String,
    #[serde(rename = "when_gived")]
    pub issue_date: String,
}

impl RegistrationRecord {
    /// Registro por defecto
    pub fn empty(today: NaiveDate) -> Self {
        Self {
            vehicle_number: String::new(),
            vehicle_type: String::new(),
            arrival_date: Some(today),
            driver_full_name: String::new(),
            passport_series: String::new(),
            passport_number: String::new(),
            issuing_authority: String::new(),
            issue_date: String::new(),
        }
    }

    /// Valor de un campo de texto (`None` para la fecha de llegada)
    pub fn text(&self, field: FieldName) -> Option<&str> {
        let value = match field {
            FieldName::VehicleNumber => &self.vehicle_number,
            FieldName::VehicleType => &self.vehicle_type,
            FieldName::ArrivalDate => return None,
            FieldName::DriverFullName => &self.driver_full_name,
            FieldName::PassportSeries => &self.passport_series,
            FieldName::PassportNumber => &self.passport_number,
            FieldName::IssuingAuthority => &self.issuing_authority,
            FieldName::IssueDate => &self.issue_date,
        };
        Some(value.as_str())
    }

    fn text_mut(&mut self, field: FieldName) -> Option<&mut String> {
        match field {
            FieldName::VehicleNumber => Some(&mut self.vehicle_number),
            FieldName::VehicleType => Some(&mut self.vehicle_type),
            FieldName::ArrivalDate => None,
            FieldName::DriverFullName => Some(&mut self.driver_full_name),
            FieldName::PassportSeries => Some(&mut self.passport_series),
            FieldName::PassportNumber => Some(&mut self.passport_number),
            FieldName::IssuingAuthority => Some(&mut self.issuing_authority),
            FieldName::IssueDate => Some(&mut self.issue_date),
        }
    }

    /// Asignar un campo de texto; devuelve `false` si el campo es la fecha
    pub fn set_text(&mut self, field: FieldName, value: impl Into<String>) -> bool {
        match self.text_mut(field) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Valor del campo tal como se escribe en el borrador
    ///
    /// La fecha se guarda como `YYYY-MM-DD`; una fecha ausente da `""`.
    pub fn stored_value(&self, field: FieldName) -> String {
        match field {
            FieldName::ArrivalDate => self
                .arrival_date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            _ => self.text(field).unwrap_or_default().to_string(),
        }
    }

    /// Superponer un borrador guardado, campo a campo
    ///
    /// Solo se tocan los campos presentes en el borrador. Las claves
    /// desconocidas, los valores que no son strings y las fechas ilegibles
    /// se ignoran. Devuelve cuántos campos se aplicaron.
    pub fn apply_draft(&mut self, mapping: &DraftMapping) -> usize {
        let mut applied = 0;

        for (name, value) in mapping {
            let field = match name.parse::<FieldName>() {
                Ok(field) => field,
                Err(_) => {
                    debug!("🔍 Clave desconocida en el borrador: {}", name);
                    continue;
                }
            };
            let value = match value.as_str() {
                Some(value) => value,
                None => {
                    warn!("⚠️ Valor no textual en el borrador para {}: {}", field, value);
                    continue;
                }
            };

            if field == FieldName::ArrivalDate {
                match parse_arrival_date(value) {
                    Some(date) => {
                        self.arrival_date = Some(date);
                        applied += 1;
                    }
                    None => warn!("⚠️ Fecha ilegible en el borrador: {:?}", value),
                }
            } else if self.set_text(field, value) {
                applied += 1;
            }
        }

        applied
    }

    /// Instantánea final; `None` si falta la fecha de llegada
    pub fn finalize(&self) -> Option<FinalizedRecord> {
        Some(FinalizedRecord {
            vehicle_number: self.vehicle_number.clone(),
            vehicle_type: self.vehicle_type.clone(),
            arrival_date: self.arrival_date?,
            driver_full_name: self.driver_full_name.clone(),
            passport_series: self.passport_series.clone(),
            passport_number: self.passport_number.clone(),
            issuing_authority: self.issuing_authority.clone(),
            issue_date: self.issue_date.clone(),
        })
    }
}

/// Registro validado que se muestra tras el envío
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizedRecord {
    #[serde(rename = "auto_number")]
    pub vehicle_number: String,
    #[serde(rename = "auto_type")]
    pub vehicle_type: String,
    #[serde(rename = "date")]
    pub arrival_date: NaiveDate,
    #[serde(rename = "fullname")]
    pub driver_full_name: String,
    #[serde(rename = "pass_series")]
    pub passport_series: String,
    #[serde(rename = "pass_number")]
    pub passport_number: String,
    #[serde(rename = "who_gived")]
    pub issuing_authority: String,
    #[serde(rename = "when_gived")]
    pub issue_date: String,
}

impl FinalizedRecord {
    /// Representación JSON legible para la superficie de visualización
    pub fn render(&self) -> Result<String, FormError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
