//! Modelos del sistema
//!
//! Este módulo contiene el registro del formulario y sus nombres de campo.

pub mod registration;

pub use registration::*;
