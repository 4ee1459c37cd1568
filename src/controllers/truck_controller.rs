use sqlx::PgPool;
use uuid::Uuid;

use crate::cache::{collection_cache, CollectionCache};
use crate::dto::common::ApiResponse;
use crate::dto::truck_dto::{CamionResponse, GuardarCamionRequest};
use crate::models::truck::{Camion, ESTADOS_CAMION};
use crate::repositories::trip_repository::ViajeRepository;
use crate::repositories::truck_repository::CamionRepository;
use crate::services::metrics_service::{self, EstadisticasEntidad};
use crate::utils::errors::AppError;
use crate::utils::validation::validate_not_empty;

pub struct CamionController {
    repository: CamionRepository,
    viajes: ViajeRepository,
    cache: CollectionCache,
}

impl CamionController {
    pub fn new(pool: PgPool, cache: CollectionCache) -> Self {
        Self {
            repository: CamionRepository::new(pool.clone()),
            viajes: ViajeRepository::new(pool),
            cache,
        }
    }

    pub async fn create(
        &self,
        request: GuardarCamionRequest,
    ) -> Result<ApiResponse<CamionResponse>, AppError> {
        let nombre = request
            .nombre
            .filter(|n| validate_not_empty(n).is_ok())
            .ok_or_else(|| {
                AppError::Validation("El nombre del camión es requerido.".to_string())
            })?;
        let placas = request
            .placas
            .filter(|p| validate_not_empty(p).is_ok())
            .ok_or_else(|| {
                AppError::Validation("Las placas del camión son requeridas.".to_string())
            })?;

        let estado = validar_estado(request.estado)?;

        let camion = self.repository.create(nombre, placas, estado).await?;
        self.cache.invalidate(collection_cache::CAMIONES).await.ok();

        Ok(ApiResponse::success_with_message(
            CamionResponse::from(camion),
            "Camión creado exitosamente".to_string(),
        ))
    }

    pub async fn list(&self) -> Result<Vec<CamionResponse>, AppError> {
        let camiones = self.coleccion().await?;
        Ok(camiones.into_iter().map(CamionResponse::from).collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<CamionResponse, AppError> {
        let camion = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Camión no encontrado".to_string()))?;

        Ok(CamionResponse::from(camion))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: GuardarCamionRequest,
    ) -> Result<ApiResponse<CamionResponse>, AppError> {
        let actual = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Camión no encontrado".to_string()))?;

        let nombre = match request.nombre {
            Some(nombre) => {
                validate_not_empty(&nombre).map_err(|_| {
                    AppError::Validation("El nombre del camión es requerido.".to_string())
                })?;
                nombre
            }
            None => actual.nombre,
        };
        let placas = match request.placas {
            Some(placas) => {
                validate_not_empty(&placas).map_err(|_| {
                    AppError::Validation("Las placas del camión son requeridas.".to_string())
                })?;
                placas
            }
            None => actual.placas,
        };
        let estado = match request.estado {
            Some(estado) => validar_estado(Some(estado))?,
            None => actual.estado,
        };

        let camion = self.repository.update(id, nombre, placas, estado).await?;
        self.cache.invalidate(collection_cache::CAMIONES).await.ok();

        Ok(ApiResponse::success_with_message(
            CamionResponse::from(camion),
            "Camión actualizado exitosamente".to_string(),
        ))
    }

    /// Eliminación permanente; los viajes conservan nombre y placas
    /// en snapshot.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Camión no encontrado".to_string()))?;

        self.repository.delete(id).await?;
        self.cache.invalidate(collection_cache::CAMIONES).await.ok();
        Ok(())
    }

    /// Estadísticas agregadas de los viajes del camión
    pub async fn estadisticas(&self, id: Uuid) -> Result<EstadisticasEntidad, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Camión no encontrado".to_string()))?;

        let viajes = self.viajes.find_by_camion(id).await?;
        Ok(metrics_service::estadisticas(&viajes))
    }

    async fn coleccion(&self) -> Result<Vec<Camion>, AppError> {
        if let Ok(Some(camiones)) = self
            .cache
            .get_collection::<Camion>(collection_cache::CAMIONES)
            .await
        {
            return Ok(camiones);
        }

        let camiones = self.repository.find_all().await?;
        let _ = self
            .cache
            .store_collection(collection_cache::CAMIONES, &camiones)
            .await;
        Ok(camiones)
    }
}

fn validar_estado(estado: Option<String>) -> Result<String, AppError> {
    let estado = estado.unwrap_or_else(|| "activo".to_string());
    if !ESTADOS_CAMION.contains(&estado.as_str()) {
        return Err(AppError::Validation(format!(
            "Estado de camión inválido: {}",
            estado
        )));
    }
    Ok(estado)
}
