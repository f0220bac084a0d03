//! Persistencia del borrador
//!
//! Lectura-modificación-escritura de un mapa campo -> valor guardado como
//! JSON bajo una única clave. No es un guardado atómico del registro: el
//! mapa puede contener solo algunos campos.

use tracing::{debug, warn};

use crate::cache::draft_store::DraftStore;
use crate::models::registration::{DraftMapping, FieldName};

/// Slot único de borrador sobre un almacén
pub struct DraftSlot<S> {
    store: S,
    key: String,
}

impl<S: DraftStore> DraftSlot<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Leer el borrador
    ///
    /// Un valor ausente, vacío o que no es un objeto JSON se trata como
    /// "sin borrador". Los fallos del almacén también. Los valores del objeto
    /// se devuelven tal cual, sean o no strings.
    pub fn load(&self) -> Option<DraftMapping> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("⚠️ Error leyendo el borrador {}: {}", self.key, e);
                return None;
            }
        };

        if raw.trim().is_empty() {
            debug!("🔍 Borrador {} vacío", self.key);
            return None;
        }

        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(serde_json::Value::Object(mapping)) => Some(mapping),
            Ok(other) => {
                warn!("⚠️ Borrador {} no es un objeto, se ignora: {}", self.key, other);
                None
            }
            Err(e) => {
                warn!("⚠️ Borrador {} ilegible, se ignora: {}", self.key, e);
                None
            }
        }
    }

    /// Fusionar `{field: value}` sobre el borrador guardado
    pub fn merge(&mut self, field: FieldName, value: &str) {
        let mut mapping = self.load().unwrap_or_default();
        mapping.insert(field.as_str().to_string(), value.into());
        self.write(&mapping);
    }

    /// Vaciar el slot (se sobrescribe con una cadena vacía)
    pub fn clear(&mut self) {
        match self.store.set(&self.key, "") {
            Ok(()) => debug!("🗑️ Borrador {} vaciado", self.key),
            Err(e) => warn!("⚠️ Error vaciando el borrador {}: {}", self.key, e),
        }
    }

    fn write(&mut self, mapping: &DraftMapping) {
        let serialized = match serde_json::to_string(mapping) {
            Ok(serialized) => serialized,
            Err(e) => {
                warn!("⚠️ Error serializando el borrador {}: {}", self.key, e);
                return;
            }
        };

        match self.store.set(&self.key, &serialized) {
            Ok(()) => debug!("💾 Borrador {} guardado ({} campos)", self.key, mapping.len()),
            Err(e) => warn!("⚠️ Error guardando el borrador {}: {}", self.key, e),
        }
    }
}
