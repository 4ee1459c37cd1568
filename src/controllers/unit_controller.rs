use sqlx::PgPool;

use crate::cache::{collection_cache, CollectionCache};
use crate::models::unit::Unidad;
use crate::repositories::unit_repository::UnidadRepository;
use crate::utils::errors::AppError;

/// Las unidades son de solo lectura en este servicio
pub struct UnidadController {
    repository: UnidadRepository,
    cache: CollectionCache,
}

impl UnidadController {
    pub fn new(pool: PgPool, cache: CollectionCache) -> Self {
        Self {
            repository: UnidadRepository::new(pool),
            cache,
        }
    }

    pub async fn list(&self) -> Result<Vec<Unidad>, AppError> {
        if let Ok(Some(unidades)) = self
            .cache
            .get_collection::<Unidad>(collection_cache::UNIDADES)
            .await
        {
            return Ok(unidades);
        }

        let unidades = self.repository.find_all().await?;
        let _ = self
            .cache
            .store_collection(collection_cache::UNIDADES, &unidades)
            .await;
        Ok(unidades)
    }
}
