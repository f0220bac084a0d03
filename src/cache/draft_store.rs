//! Almacén de borradores
//!
//! Contrato clave-valor mínimo (`get` / `set`) sobre el que se guarda el
//! borrador del formulario. Se inyecta en el formulario en lugar de ser
//! un estado global, así los tests usan la versión en memoria.

use std::collections::HashMap;

use tracing::debug;

use crate::utils::errors::StoreError;

/// Operaciones del almacén de borradores
pub trait DraftStore {
    /// Leer el valor guardado bajo `key`, si existe
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Sobrescribir el valor guardado bajo `key`
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<T: DraftStore + ?Sized> DraftStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// Almacén en memoria, sin persistencia entre procesos
#[derive(Debug, Clone, Default)]
pub struct MemoryDraftStore {
    entries: HashMap<String, String>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Almacén con un valor ya guardado
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.into(), value.into());
        store
    }

    /// Valor crudo bajo `key`
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl DraftStore for MemoryDraftStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self.entries.get(key).cloned();
        debug!("📥 Memory GET {}: {}", key, if value.is_some() { "hit" } else { "miss" });
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        debug!("💾 Memory SET {} ({} bytes)", key, value.len());
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
