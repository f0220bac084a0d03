//! Almacén de borradores en Redis
//!
//! Guarda el borrador como un string de Redis. Se abre una conexión por
//! operación: el formulario hace una lectura al montar y una escritura por
//! edición, no hay tráfico que justifique un pool.

use redis::Commands;
use tracing::{debug, info};

use super::draft_store::DraftStore;
use crate::utils::errors::StoreError;

pub struct RedisDraftStore {
    client: redis::Client,
}

impl RedisDraftStore {
    /// Conectar y comprobar el servidor con PING
    pub fn open(redis_url: &str) -> Result<Self, StoreError> {
        info!("🔗 Conectando a Redis: {}", redis_url);

        let client = redis::Client::open(redis_url)?;
        let mut conn = client.get_connection()?;
        let _: String = redis::cmd("PING").query(&mut conn)?;

        info!("✅ Redis conectado exitosamente");
        Ok(Self { client })
    }

    /// Generar clave con prefijo
    fn make_key(&self, key: &str) -> String {
        format!("vehicle_registration_form:draft:{}", key)
    }
}

impl DraftStore for RedisDraftStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.client.get_connection()?;
        let value: Option<String> = conn.get(self.make_key(key))?;
        debug!("📥 Redis GET {}: {}", key, if value.is_some() { "hit" } else { "miss" });
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.client.get_connection()?;
        let _: () = conn.set(self.make_key(key), value)?;
        debug!("💾 Redis SET {} ({} bytes)", key, value.len());
        Ok(())
    }
}
