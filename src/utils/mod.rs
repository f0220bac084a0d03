//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación
//! y la máscara de entrada de fechas.

pub mod errors;
pub mod input_mask;
pub mod validation;

pub use errors::{FormError, StoreError};
