//! Configuración del almacén de borradores
//!
//! Este módulo contiene la configuración del slot de borrador: qué backend
//! se usa, dónde vive y bajo qué clave.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::utils::errors::FormError;

pub const DEFAULT_DRAFT_KEY: &str = "form_data";

/// Backend del almacén de borradores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftBackend {
    File,
    Memory,
    Redis,
}

impl FromStr for DraftBackend {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(DraftBackend::File),
            "memory" => Ok(DraftBackend::Memory),
            "redis" => Ok(DraftBackend::Redis),
            other => Err(FormError::Config(format!(
                "DRAFT_BACKEND must be file, memory or redis (got {:?})",
                other
            ))),
        }
    }
}

impl fmt::Display for DraftBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DraftBackend::File => "file",
            DraftBackend::Memory => "memory",
            DraftBackend::Redis => "redis",
        };
        f.write_str(name)
    }
}

/// Configuración del almacén de borradores
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftStoreConfig {
    pub backend: DraftBackend,
    pub directory: PathBuf,
    pub key: String,
    pub redis_url: String,
}

impl Default for DraftStoreConfig {
    fn default() -> Self {
        Self {
            backend: DraftBackend::File,
            directory: PathBuf::from(".form_draft"),
            key: DEFAULT_DRAFT_KEY.to_string(),
            redis_url: "redis://localhost:6379".to_string(),
        }
    }
}
