//! Cache por colección
//!
//! Cada lectura se cachea completa bajo la clave de su colección (viajes,
//! conductores, camiones, unidades) y cualquier escritura sobre esa colección
//! la invalida entera. No hay actualización parcial por fila: ese es el
//! contrato, no una optimización pendiente.

use anyhow::Result;
use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use super::redis_client::RedisClient;
use super::CacheOperations;

pub const VIAJES: &str = "viajes";
pub const CONDUCTORES: &str = "conductores";
pub const CAMIONES: &str = "camiones";
pub const UNIDADES: &str = "unidades";

/// Cache de colecciones completas sobre Redis
#[derive(Clone)]
pub struct CollectionCache {
    redis: RedisClient,
}

impl CollectionCache {
    pub fn new(redis: RedisClient) -> Self {
        Self { redis }
    }

    fn collection_key(&self, collection: &str) -> String {
        self.redis.make_key("collection", collection)
    }

    /// Obtener una colección completa del cache
    pub async fn get_collection<T: DeserializeOwned>(
        &self,
        collection: &str,
    ) -> Result<Option<Vec<T>>> {
        self.redis.get(&self.collection_key(collection)).await
    }

    /// Guardar una colección completa en el cache
    pub async fn store_collection<T: Serialize + Send + Sync>(
        &self,
        collection: &str,
        records: &[T],
    ) -> Result<()> {
        let ttl = self.redis.default_ttl();
        if let Err(e) = self
            .redis
            .set(&self.collection_key(collection), &records, ttl)
            .await
        {
            // Un cache que no escribe no debe tumbar la lectura
            warn!("⚠️ No se pudo cachear la colección {}: {}", collection, e);
        }
        Ok(())
    }

    /// Invalidar una colección completa tras una escritura
    pub async fn invalidate(&self, collection: &str) -> Result<()> {
        self.redis.delete(&self.collection_key(collection)).await
    }

    pub async fn is_connected(&self) -> bool {
        self.redis.is_connected().await
    }
}
