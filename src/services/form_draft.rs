//! Formulario de vehículo y conductor con borrador persistente
//!
//! Estado reactivo del formulario: el registro en edición, los errores por
//! campo y el conjunto de campos tocados. Cada cambio de campo pasa por una
//! única función de actualización que valida, marca el campo como tocado y
//! escribe el valor en el borrador si no está vacío.
//!
//! Los errores se calculan en cuanto un valor incumple su regla, pero solo
//! son visibles para campos tocados; un intento de envío toca todos.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};
use validator::ValidationErrors;

use crate::cache::cache_config::DEFAULT_DRAFT_KEY;
use crate::cache::draft_store::DraftStore;
use crate::models::registration::{FieldName, FinalizedRecord, RegistrationRecord};
use crate::services::draft_persistence::DraftSlot;
use crate::services::registration_schema::{check_field, validate_record, FieldError};
use crate::utils::errors::FormError;
use crate::utils::validation::parse_arrival_date;

pub struct FormDraft<S: DraftStore> {
    record: RegistrationRecord,
    errors: BTreeMap<FieldName, FieldError>,
    touched: BTreeSet<FieldName>,
    today: NaiveDate,
    draft: DraftSlot<S>,
}

impl<S: DraftStore> FormDraft<S> {
    /// Montar el formulario con la clave por defecto y la fecha de hoy
    pub fn mount(store: S) -> Self {
        Self::mount_with(store, DEFAULT_DRAFT_KEY, Local::now().date_naive())
    }

    /// Montar el formulario leyendo el borrador una sola vez
    ///
    /// Si hay un borrador no vacío se superpone al registro por defecto
    /// campo a campo; si no, se usa el registro por defecto.
    pub fn mount_with(store: S, key: impl Into<String>, today: NaiveDate) -> Self {
        let draft = DraftSlot::new(store, key);
        let mut record = RegistrationRecord::empty(today);

        match draft.load() {
            Some(mapping) if !mapping.is_empty() => {
                let applied = record.apply_draft(&mapping);
                info!(
                    "📥 Borrador {} restaurado ({} de {} campos)",
                    draft.key(),
                    applied,
                    mapping.len()
                );
            }
            _ => debug!("📝 Sin borrador en {}, formulario vacío", draft.key()),
        }

        Self {
            record,
            errors: BTreeMap::new(),
            touched: BTreeSet::new(),
            today,
            draft,
        }
    }

    pub fn record(&self) -> &RegistrationRecord {
        &self.record
    }

    /// Registro por defecto de este montaje
    pub fn default_record(&self) -> RegistrationRecord {
        RegistrationRecord::empty(self.today)
    }

    /// Cambiar un campo a partir de texto
    ///
    /// Para la fecha de llegada el texto se interpreta como `YYYY-MM-DD`:
    /// un texto vacío borra la fecha y un texto ilegible se rechaza sin
    /// tocar el formulario.
    pub fn change(&mut self, field: FieldName, value: &str) -> Result<(), FormError> {
        if field == FieldName::ArrivalDate {
            if value.trim().is_empty() {
                self.change_arrival_date(None);
                return Ok(());
            }
            let date = parse_arrival_date(value)
                .ok_or_else(|| FormError::InvalidDate(value.to_string()))?;
            self.change_arrival_date(Some(date));
            return Ok(());
        }

        self.record.set_text(field, value);
        self.commit(field);
        Ok(())
    }

    /// Cambiar la fecha de llegada desde el calendario
    pub fn change_arrival_date(&mut self, date: Option<NaiveDate>) {
        self.record.arrival_date = date;
        self.commit(FieldName::ArrivalDate);
    }

    /// Marcar un campo como tocado sin cambiar su valor (pérdida de foco)
    pub fn touch(&mut self, field: FieldName) {
        self.touched.insert(field);
        self.revalidate(field);
    }

    pub fn is_touched(&self, field: FieldName) -> bool {
        self.touched.contains(&field)
    }

    /// Error calculado del campo, visible o no
    pub fn error(&self, field: FieldName) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    /// Error que debe mostrarse junto al campo
    pub fn visible_error(&self, field: FieldName) -> Option<&FieldError> {
        if self.is_touched(field) {
            self.error(field)
        } else {
            None
        }
    }

    /// Errores visibles en el orden del formulario
    pub fn visible_errors(&self) -> Vec<(FieldName, &FieldError)> {
        FieldName::ALL
            .into_iter()
            .filter_map(|field| self.visible_error(field).map(|error| (field, error)))
            .collect()
    }

    /// Número de errores calculados
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Intentar enviar el formulario
    ///
    /// Valida todos los campos y los marca como tocados. Si alguno falla el
    /// envío queda bloqueado y se devuelven los errores; si no, se devuelve
    /// el registro finalizado. No hay más persistencia.
    pub fn submit(&mut self) -> Result<FinalizedRecord, FormError> {
        self.touched.extend(FieldName::ALL);
        self.errors.clear();

        let failures = match validate_record(&self.record) {
            Ok(()) => None,
            Err(failures) => {
                for (name, errors) in failures.field_errors() {
                    if let (Ok(field), Some(error)) = (name.parse::<FieldName>(), errors.first()) {
                        self.errors.insert(field, FieldError::from(error));
                    }
                }
                Some(failures)
            }
        };

        match (failures, self.record.finalize()) {
            (None, Some(finalized)) => {
                info!("✅ Formulario enviado: {}", finalized.vehicle_number);
                Ok(finalized)
            }
            (failures, _) => {
                warn!("❌ Envío bloqueado: {} campos con errores", self.errors.len());
                Err(FormError::Validation(failures.unwrap_or_else(ValidationErrors::new)))
            }
        }
    }

    /// Cancelar: registro por defecto y borrador vacío
    ///
    /// Los campos tocados y los errores calculados se conservan; se
    /// recalculan con el siguiente cambio o envío.
    pub fn cancel(&mut self) {
        self.record = self.default_record();
        self.draft.clear();
        info!("🧹 Formulario reiniciado");
    }

    pub fn draft(&self) -> &DraftSlot<S> {
        &self.draft
    }

    pub fn store(&self) -> &S {
        self.draft.store()
    }

    /// Desmontar el formulario devolviendo el almacén
    pub fn into_store(self) -> S {
        self.draft.into_store()
    }

    fn commit(&mut self, field: FieldName) {
        self.revalidate(field);
        self.touched.insert(field);

        // Un valor vacío no toca el borrador: el valor anterior se conserva
        let stored = self.record.stored_value(field);
        if !stored.is_empty() {
            self.draft.merge(field, &stored);
        }
    }

    fn revalidate(&mut self, field: FieldName) {
        match check_field(&self.record, field) {
            Some(error) => {
                debug!("🔍 Campo {} inválido: {}", field, error.message);
                self.errors.insert(field, error);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }
}
