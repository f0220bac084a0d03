//! Formulario de registro de vehículos y conductores
//!
//! Un único componente, [`FormDraft`], que valida los campos del registro,
//! guarda un borrador campo a campo en un almacén clave-valor inyectado y
//! produce el registro finalizado cuando el envío es válido.

pub mod cache;
pub mod config;
pub mod controllers;
pub mod models;
pub mod services;
pub mod utils;

pub use cache::{DraftStore, FileDraftStore, MemoryDraftStore, RedisDraftStore};
pub use models::{FieldName, FinalizedRecord, RegistrationRecord};
pub use services::{FieldError, FieldErrorKind, FormDraft};
pub use utils::{FormError, StoreError};
