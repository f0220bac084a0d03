//! Sistema de manejo de errores
//!
//! Este módulo define los tipos de error del formulario y del almacén
//! de borradores. Los errores de validación de campo no pasan por aquí:
//! son valores calculados que se muestran junto a cada campo.

use thiserror::Error;

/// Errores del almacén de borradores
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Invalid draft key: {0}")]
    InvalidKey(String),
}

/// Errores principales del formulario
#[derive(Error, Debug)]
pub enum FormError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Draft store error: {0}")]
    Store(#[from] StoreError),

    #[error("Render error: {0}")]
    Render(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}
