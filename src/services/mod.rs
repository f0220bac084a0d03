//! Services module
//!
//! Este módulo contiene la lógica del formulario: el esquema de
//! validación, la persistencia del borrador y el componente del formulario.

pub mod draft_persistence;
pub mod form_draft;
pub mod registration_schema;

pub use draft_persistence::DraftSlot;
pub use form_draft::FormDraft;
pub use registration_schema::{FieldError, FieldErrorKind};
