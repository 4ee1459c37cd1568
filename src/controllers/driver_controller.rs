use sqlx::PgPool;
use uuid::Uuid;

use crate::cache::{collection_cache, CollectionCache};
use crate::dto::common::ApiResponse;
use crate::dto::driver_dto::{ConductorResponse, GuardarConductorRequest};
use crate::models::driver::{Conductor, ESTADOS_CONDUCTOR};
use crate::repositories::driver_repository::ConductorRepository;
use crate::repositories::trip_repository::ViajeRepository;
use crate::services::metrics_service::{self, EstadisticasEntidad};
use crate::utils::errors::AppError;
use crate::utils::validation::validate_not_empty;

pub struct ConductorController {
    repository: ConductorRepository,
    viajes: ViajeRepository,
    cache: CollectionCache,
}

impl ConductorController {
    pub fn new(pool: PgPool, cache: CollectionCache) -> Self {
        Self {
            repository: ConductorRepository::new(pool.clone()),
            viajes: ViajeRepository::new(pool),
            cache,
        }
    }

    pub async fn create(
        &self,
        request: GuardarConductorRequest,
    ) -> Result<ApiResponse<ConductorResponse>, AppError> {
        let nombre = request
            .nombre
            .filter(|n| validate_not_empty(n).is_ok())
            .ok_or_else(|| {
                AppError::Validation("El nombre del conductor es requerido.".to_string())
            })?;

        let estado = validar_estado(request.estado)?;

        let conductor = self
            .repository
            .create(nombre, request.licencia, request.telefono, estado)
            .await?;
        self.cache
            .invalidate(collection_cache::CONDUCTORES)
            .await
            .ok();

        Ok(ApiResponse::success_with_message(
            ConductorResponse::from(conductor),
            "Conductor creado exitosamente".to_string(),
        ))
    }

    pub async fn list(&self) -> Result<Vec<ConductorResponse>, AppError> {
        let conductores = self.coleccion().await?;
        Ok(conductores
            .into_iter()
            .map(ConductorResponse::from)
            .collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<ConductorResponse, AppError> {
        let conductor = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Conductor no encontrado".to_string()))?;

        Ok(ConductorResponse::from(conductor))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: GuardarConductorRequest,
    ) -> Result<ApiResponse<ConductorResponse>, AppError> {
        let actual = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Conductor no encontrado".to_string()))?;

        let nombre = match request.nombre {
            Some(nombre) => {
                validate_not_empty(&nombre).map_err(|_| {
                    AppError::Validation("El nombre del conductor es requerido.".to_string())
                })?;
                nombre
            }
            None => actual.nombre,
        };
        let estado = match request.estado {
            Some(estado) => validar_estado(Some(estado))?,
            None => actual.estado,
        };

        let conductor = self
            .repository
            .update(
                id,
                nombre,
                request.licencia.or(actual.licencia),
                request.telefono.or(actual.telefono),
                estado,
            )
            .await?;
        self.cache
            .invalidate(collection_cache::CONDUCTORES)
            .await
            .ok();

        Ok(ApiResponse::success_with_message(
            ConductorResponse::from(conductor),
            "Conductor actualizado exitosamente".to_string(),
        ))
    }

    /// Eliminación permanente. Los viajes del conductor no se tocan ni se
    /// invalida su colección: conservan el snapshot del nombre.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Conductor no encontrado".to_string()))?;

        self.repository.delete(id).await?;
        self.cache
            .invalidate(collection_cache::CONDUCTORES)
            .await
            .ok();
        Ok(())
    }

    /// Estadísticas agregadas de los viajes del conductor
    pub async fn estadisticas(&self, id: Uuid) -> Result<EstadisticasEntidad, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Conductor no encontrado".to_string()))?;

        let viajes = self.viajes.find_by_conductor(id).await?;
        Ok(metrics_service::estadisticas(&viajes))
    }

    async fn coleccion(&self) -> Result<Vec<Conductor>, AppError> {
        if let Ok(Some(conductores)) = self
            .cache
            .get_collection::<Conductor>(collection_cache::CONDUCTORES)
            .await
        {
            return Ok(conductores);
        }

        let conductores = self.repository.find_all().await?;
        let _ = self
            .cache
            .store_collection(collection_cache::CONDUCTORES, &conductores)
            .await;
        Ok(conductores)
    }
}

fn validar_estado(estado: Option<String>) -> Result<String, AppError> {
    let estado = estado.unwrap_or_else(|| "activo".to_string());
    if !ESTADOS_CONDUCTOR.contains(&estado.as_str()) {
        return Err(AppError::Validation(format!(
            "Estado de conductor inválido: {}",
            estado
        )));
    }
    Ok(estado)
}
