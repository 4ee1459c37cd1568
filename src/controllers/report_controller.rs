//! Reportes y tableros
//!
//! Todos los reportes corren sobre el mismo subconjunto visible que produce
//! el filtrado en memoria, de modo que las tarjetas, las gráficas y el CSV
//! siempre cuentan la misma historia.

use sqlx::PgPool;

use crate::cache::{collection_cache, CollectionCache};
use crate::dto::trip_dto::ViajeFilterQuery;
use crate::models::trip::Viaje;
use crate::repositories::trip_repository::ViajeRepository;
use crate::services::metrics_service::{
    self, EficienciaRuta, PuntoConsumo, ResumenViajes,
};
use crate::services::report_service::{self, ReporteCsv};
use crate::utils::errors::AppError;

pub struct ReporteController {
    viajes: ViajeRepository,
    cache: CollectionCache,
}

impl ReporteController {
    pub fn new(pool: PgPool, cache: CollectionCache) -> Self {
        Self {
            viajes: ViajeRepository::new(pool),
            cache,
        }
    }

    /// Resumen para las tarjetas del panel de control
    pub async fn resumen(&self, query: ViajeFilterQuery) -> Result<ResumenViajes, AppError> {
        let visibles = self.visibles(query).await?;
        Ok(metrics_service::resumen(&visibles))
    }

    /// Tendencia de consumo de los viajes más recientes
    pub async fn consumo(&self, query: ViajeFilterQuery) -> Result<Vec<PuntoConsumo>, AppError> {
        let visibles = self.visibles(query).await?;
        Ok(metrics_service::tendencia_consumo(&visibles))
    }

    /// Eficiencia ponderada por ruta de ida
    pub async fn eficiencia_rutas(
        &self,
        query: ViajeFilterQuery,
    ) -> Result<Vec<EficienciaRuta>, AppError> {
        let visibles = self.visibles(query).await?;
        Ok(metrics_service::eficiencia_por_ruta(&visibles))
    }

    /// Exportar el subconjunto visible a CSV. `None` cuando no hay filas.
    pub async fn export(&self, query: ViajeFilterQuery) -> Result<Option<ReporteCsv>, AppError> {
        let visibles = self.visibles(query).await?;
        Ok(report_service::exportar_viajes(&visibles))
    }

    async fn visibles(&self, query: ViajeFilterQuery) -> Result<Vec<Viaje>, AppError> {
        let filters = query.into_filters()?;
        let viajes = self.coleccion().await?;
        Ok(filters.aplicar(viajes))
    }

    async fn coleccion(&self) -> Result<Vec<Viaje>, AppError> {
        if let Ok(Some(viajes)) = self
            .cache
            .get_collection::<Viaje>(collection_cache::VIAJES)
            .await
        {
            return Ok(viajes);
        }

        let viajes = self.viajes.find_all().await?;
        let _ = self
            .cache
            .store_collection(collection_cache::VIAJES, &viajes)
            .await;
        Ok(viajes)
    }
}
