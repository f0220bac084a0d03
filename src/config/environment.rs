//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno. Todas las variables
//! tienen valor por defecto; un valor presente pero inválido es un error.

use std::env;
use std::path::PathBuf;

use tracing::Level;

use crate::cache::cache_config::{DraftBackend, DraftStoreConfig};
use crate::utils::errors::FormError;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub log_level: Level,
    pub draft: DraftStoreConfig,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            log_level: Level::INFO,
            draft: DraftStoreConfig::default(),
        }
    }
}

impl EnvironmentConfig {
    /// Leer la configuración de las variables de entorno del proceso
    pub fn from_env() -> Result<Self, FormError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Leer la configuración desde una función de búsqueda de variables
    pub fn from_lookup<F>(lookup: F) -> Result<Self, FormError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(environment) = lookup("ENVIRONMENT") {
            config.environment = environment;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            config.log_level = level
                .parse()
                .map_err(|_| FormError::Config(format!("LOG_LEVEL is not a valid level: {}", level)))?;
        }
        if let Some(backend) = lookup("DRAFT_BACKEND") {
            config.draft.backend = backend.parse::<DraftBackend>()?;
        }
        if let Some(directory) = lookup("DRAFT_DIR") {
            config.draft.directory = PathBuf::from(directory);
        }
        if let Some(key) = lookup("DRAFT_KEY") {
            if key.trim().is_empty() {
                return Err(FormError::Config("DRAFT_KEY must not be empty".to_string()));
            }
            config.draft.key = key;
        }
        if let Some(redis_url) = lookup("REDIS_URL") {
            config.draft.redis_url = redis_url;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EnvironmentConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.environment, "development");
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.draft.backend, DraftBackend::File);
        assert_eq!(config.draft.key, "form_data");
    }

    #[test]
    fn test_overrides() {
        let config = EnvironmentConfig::from_lookup(lookup(&[
            ("ENVIRONMENT", "production"),
            ("LOG_LEVEL", "debug"),
            ("DRAFT_BACKEND", "memory"),
            ("DRAFT_DIR", "/tmp/drafts"),
            ("DRAFT_KEY", "truck_form"),
        ]))
        .unwrap();

        assert_eq!(config.environment, "production");
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(config.draft.backend, DraftBackend::Memory);
        assert_eq!(config.draft.directory, PathBuf::from("/tmp/drafts"));
        assert_eq!(config.draft.key, "truck_form");
    }

    #[test]
    fn test_invalid_values() {
        assert!(EnvironmentConfig::from_lookup(lookup(&[("LOG_LEVEL", "loud")])).is_err());
        assert!(EnvironmentConfig::from_lookup(lookup(&[("DRAFT_BACKEND", "s3")])).is_err());
        assert!(EnvironmentConfig::from_lookup(lookup(&[("DRAFT_KEY", " ")])).is_err());
    }
}
