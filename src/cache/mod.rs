//! Cache
//!
//! Este módulo contiene el almacén del borrador del formulario y sus
//! backends (memoria, disco, Redis).

pub mod cache_config;
pub mod draft_store;
pub mod file_store;
pub mod redis_store;

pub use cache_config::{DraftBackend, DraftStoreConfig, DEFAULT_DRAFT_KEY};
pub use draft_store::{DraftStore, MemoryDraftStore};
pub use file_store::FileDraftStore;
pub use redis_store::RedisDraftStore;

use tracing::info;

use crate::utils::errors::StoreError;

/// Abrir el backend configurado
pub fn open_store(config: &DraftStoreConfig) -> Result<Box<dyn DraftStore>, StoreError> {
    info!("🗄️ Almacén de borradores: {}", config.backend);

    let store: Box<dyn DraftStore> = match config.backend {
        DraftBackend::File => Box::new(FileDraftStore::new(config.directory.clone())),
        DraftBackend::Memory => Box::new(MemoryDraftStore::new()),
        DraftBackend::Redis => Box::new(RedisDraftStore::open(&config.redis_url)?),
    };

    Ok(store)
}
