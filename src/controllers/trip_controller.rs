//! Ciclo de vida de viajes
//!
//! La validación corre completa antes de tocar la base de datos y devuelve
//! un único mensaje legible; si falla, el borrador del cliente queda intacto
//! porque no hubo escritura parcial. Al validar se recalculan los derivados
//! y se toman los snapshots de conductor y camión vigentes en ese momento.

use sqlx::PgPool;
use uuid::Uuid;

use crate::cache::{collection_cache, CollectionCache};
use crate::dto::common::ApiResponse;
use crate::dto::trip_dto::{GuardarViajeRequest, ViajeFilterQuery, ViajeResponse};
use crate::models::trip::{RutaAdicional, Viaje};
use crate::repositories::driver_repository::ConductorRepository;
use crate::repositories::trip_repository::{ViajeDatos, ViajeRepository};
use crate::repositories::truck_repository::CamionRepository;
use crate::services::metrics_service;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::{validate_non_negative, validate_positive};

const MSG_OBLIGATORIOS: &str = "Por favor completa todos los campos obligatorios marcados con *.";
const MSG_LITROS: &str = "Los litros consumidos deben ser mayores a cero.";

pub struct ViajeController {
    viajes: ViajeRepository,
    conductores: ConductorRepository,
    camiones: CamionRepository,
    cache: CollectionCache,
}

impl ViajeController {
    pub fn new(pool: PgPool, cache: CollectionCache) -> Self {
        Self {
            viajes: ViajeRepository::new(pool.clone()),
            conductores: ConductorRepository::new(pool.clone()),
            camiones: CamionRepository::new(pool),
            cache,
        }
    }

    /// Colección completa, del cache si está vigente
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

    /// Listar los viajes visibles bajo los filtros del query string
    pub async fn list(&self, query: ViajeFilterQuery) -> Result<Vec<ViajeResponse>, AppError> {
        let filters = query.into_filters()?;
        let viajes = self.coleccion().await?;

        Ok(filters
            .aplicar(viajes)
            .into_iter()
            .map(ViajeResponse::from)
            .collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<ViajeResponse, AppError> {
        let viaje = self
            .viajes
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Viaje", &id.to_string()))?;

        Ok(ViajeResponse::from(viaje))
    }

    pub async fn create(
        &self,
        request: GuardarViajeRequest,
    ) -> Result<ApiResponse<ViajeResponse>, AppError> {
        let datos = self.validar_y_armar(request).await?;

        let viaje = self.viajes.create(datos).await?;
        self.cache.invalidate(collection_cache::VIAJES).await.ok();

        Ok(ApiResponse::success_with_message(
            ViajeResponse::from(viaje),
            "Viaje registrado exitosamente".to_string(),
        ))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: GuardarViajeRequest,
    ) -> Result<ApiResponse<ViajeResponse>, AppError> {
        self.viajes
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Viaje no encontrado".to_string()))?;

        let datos = self.validar_y_armar(request).await?;

        let viaje = self.viajes.update(id, datos).await?;
        self.cache.invalidate(collection_cache::VIAJES).await.ok();

        Ok(ApiResponse::success_with_message(
            ViajeResponse::from(viaje),
            "Viaje actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.viajes
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Viaje no encontrado".to_string()))?;

        self.viajes.delete(id).await?;
        self.cache.invalidate(collection_cache::VIAJES).await.ok();
        Ok(())
    }

    /// Validar el borrador completo y armar el registro a persistir.
    /// Exactamente una llamada de escritura sigue a una validación exitosa.
    async fn validar_y_armar(&self, request: GuardarViajeRequest) -> Result<ViajeDatos, AppError> {
        let borrador = validar_borrador(request)?;

        // Snapshot de las entidades referenciadas al momento de escribir
        let (conductor, camion) = futures::try_join!(
            self.conductores.find_by_id(borrador.conductor_id),
            self.camiones.find_by_id(borrador.camion_id)
        )?;
        let conductor = conductor
            .ok_or_else(|| AppError::NotFound("El conductor seleccionado no existe".to_string()))?;
        let camion = camion
            .ok_or_else(|| AppError::NotFound("El camión seleccionado no existe".to_string()))?;

        let totales = metrics_service::calcular_totales(
            borrador.kilometros_ida,
            &borrador.rutas_adicionales,
            Some(borrador.kilometros_regreso),
            borrador.litros_combustible,
        );

        Ok(ViajeDatos {
            fecha: borrador.fecha,
            conductor_id: Some(conductor.id),
            conductor_nombre: Some(conductor.nombre),
            camion_id: Some(camion.id),
            camion_nombre: Some(camion.nombre),
            camion_placas: Some(camion.placas),
            ruta_ida: borrador.ruta_ida,
            kilometros_ida: borrador.kilometros_ida,
            rutas_adicionales: borrador.rutas_adicionales,
            ruta_regreso: Some(borrador.ruta_regreso),
            kilometros_regreso: Some(borrador.kilometros_regreso),
            kilometros_total: totales.kilometros_total,
            litros_combustible: borrador.litros_combustible,
            km_por_litro: totales.km_por_litro,
            costo_combustible: borrador.costo_combustible,
            notas: borrador.notas,
        })
    }
}

/// Borrador con los obligatorios ya presentes y los tramos normalizados
#[derive(Debug)]
struct BorradorViaje {
    fecha: chrono::NaiveDate,
    conductor_id: Uuid,
    camion_id: Uuid,
    ruta_ida: String,
    kilometros_ida: f64,
    rutas_adicionales: Vec<RutaAdicional>,
    ruta_regreso: String,
    kilometros_regreso: f64,
    litros_combustible: f64,
    costo_combustible: Option<f64>,
    notas: Option<String>,
}

/// Validación de campos del borrador, sin tocar la base de datos. Devuelve
/// un único mensaje legible por fallo.
fn validar_borrador(request: GuardarViajeRequest) -> Result<BorradorViaje, AppError> {
    let obligatorio = || AppError::Validation(MSG_OBLIGATORIOS.to_string());

    let fecha = request.fecha.ok_or_else(obligatorio)?;
    let conductor_id = request.conductor_id.ok_or_else(obligatorio)?;
    let camion_id = request.camion_id.ok_or_else(obligatorio)?;

    let ruta_ida = request
        .ruta_ida
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .ok_or_else(obligatorio)?;
    let kilometros_ida = request
        .kilometros_ida
        .filter(|km| validate_positive(*km).is_ok())
        .ok_or_else(obligatorio)?;

    let ruta_regreso = request
        .ruta_regreso
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .ok_or_else(obligatorio)?;
    let kilometros_regreso = request
        .kilometros_regreso
        .filter(|km| validate_positive(*km).is_ok())
        .ok_or_else(obligatorio)?;

    let litros_combustible = request.litros_combustible.ok_or_else(obligatorio)?;
    if validate_positive(litros_combustible).is_err() {
        return Err(AppError::Validation(MSG_LITROS.to_string()));
    }

    // Cada ruta adicional se valida de forma independiente
    let mut rutas_adicionales = Vec::with_capacity(request.rutas_adicionales.len());
    for (indice, adicional) in request.rutas_adicionales.into_iter().enumerate() {
        let ruta = adicional
            .ruta
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        let kilometros = adicional
            .kilometros
            .filter(|km| validate_non_negative(*km).is_ok());

        match (ruta, kilometros) {
            (Some(ruta), Some(kilometros)) => {
                rutas_adicionales.push(RutaAdicional { ruta, kilometros })
            }
            _ => {
                return Err(AppError::Validation(format!(
                    "Por favor completa correctamente los datos (ruta y km > 0) de la ruta adicional {}.",
                    indice + 1
                )))
            }
        }
    }

    Ok(BorradorViaje {
        fecha,
        conductor_id,
        camion_id,
        ruta_ida,
        kilometros_ida,
        rutas_adicionales,
        ruta_regreso,
        kilometros_regreso,
        litros_combustible,
        costo_combustible: request.costo_combustible,
        notas: request.notas.filter(|n| !n.trim().is_empty()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::trip_dto::RutaAdicionalRequest;
    use chrono::NaiveDate;

    fn borrador_completo() -> GuardarViajeRequest {
        GuardarViajeRequest {
            fecha: NaiveDate::from_ymd_opt(2026, 3, 15),
            conductor_id: Some(Uuid::new_v4()),
            camion_id: Some(Uuid::new_v4()),
            ruta_ida: Some("SLP - CDMX".to_string()),
            kilometros_ida: Some(420.0),
            rutas_adicionales: vec![],
            ruta_regreso: Some("CDMX - SLP".to_string()),
            kilometros_regreso: Some(420.0),
            litros_combustible: Some(350.0),
            costo_combustible: Some(8750.0),
            notas: Some("Carga completa".to_string()),
        }
    }

    fn mensaje(error: AppError) -> String {
        match error {
            AppError::Validation(msg) => msg,
            otro => panic!("se esperaba error de validación, hubo: {:?}", otro),
        }
    }

    #[test]
    fn test_borrador_completo_es_valido() {
        let borrador = validar_borrador(borrador_completo()).unwrap();
        assert_eq!(borrador.ruta_ida, "SLP - CDMX");
        assert_eq!(borrador.kilometros_regreso, 420.0);
    }

    #[test]
    fn test_obligatorios_ausentes() {
        let mut request = borrador_completo();
        request.fecha = None;
        assert_eq!(mensaje(validar_borrador(request).unwrap_err()), MSG_OBLIGATORIOS);

        let mut request = borrador_completo();
        request.conductor_id = None;
        assert_eq!(mensaje(validar_borrador(request).unwrap_err()), MSG_OBLIGATORIOS);

        let mut request = borrador_completo();
        request.ruta_ida = Some("   ".to_string());
        assert_eq!(mensaje(validar_borrador(request).unwrap_err()), MSG_OBLIGATORIOS);

        let mut request = borrador_completo();
        request.kilometros_ida = Some(0.0);
        assert_eq!(mensaje(validar_borrador(request).unwrap_err()), MSG_OBLIGATORIOS);
    }

    #[test]
    fn test_litros_cero_se_rechaza_antes_de_persistir() {
        let mut request = borrador_completo();
        request.litros_combustible = Some(0.0);
        assert_eq!(mensaje(validar_borrador(request).unwrap_err()), MSG_LITROS);

        let mut request = borrador_completo();
        request.litros_combustible = Some(-10.0);
        assert_eq!(mensaje(validar_borrador(request).unwrap_err()), MSG_LITROS);
    }

    #[test]
    fn test_ruta_adicional_invalida_nombra_su_posicion() {
        let mut request = borrador_completo();
        request.rutas_adicionales = vec![
            RutaAdicionalRequest {
                ruta: Some("CEDIS Norte".to_string()),
                kilometros: Some(50.0),
            },
            RutaAdicionalRequest {
                ruta: Some("".to_string()),
                kilometros: Some(30.0),
            },
        ];
        let msg = mensaje(validar_borrador(request).unwrap_err());
        assert!(msg.contains("ruta adicional 2"));
    }

    #[test]
    fn test_ruta_adicional_km_cero_es_valida() {
        let mut request = borrador_completo();
        request.rutas_adicionales = vec![RutaAdicionalRequest {
            ruta: Some("Maniobra en patio".to_string()),
            kilometros: Some(0.0),
        }];
        let borrador = validar_borrador(request).unwrap();
        assert_eq!(borrador.rutas_adicionales.len(), 1);
    }

    #[test]
    fn test_ruta_adicional_km_negativo_se_rechaza() {
        let mut request = borrador_completo();
        request.rutas_adicionales = vec![RutaAdicionalRequest {
            ruta: Some("CEDIS Norte".to_string()),
            kilometros: Some(-5.0),
        }];
        assert!(validar_borrador(request).is_err());
    }
}
