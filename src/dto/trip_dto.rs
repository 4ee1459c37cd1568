use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::trip::{RutaAdicional, Viaje};
use crate::services::filter_service::{PeriodoFiltro, ViajeFilters};
use crate::services::metrics_service::{clasificar_eficiencia, NivelEficiencia};
use crate::utils::errors::AppError;
use crate::utils::validation::{validate_date, validate_uuid};

// Borrador de viaje para crear o actualizar. Todos los campos llegan
// opcionales: la validación de obligatorios corre en el controlador para
// poder devolver un único mensaje legible, no un error de deserialización.
#[derive(Debug, Deserialize)]
pub struct GuardarViajeRequest {
    pub fecha: Option<NaiveDate>,
    pub conductor_id: Option<Uuid>,
    pub camion_id: Option<Uuid>,
    pub ruta_ida: Option<String>,
    pub kilometros_ida: Option<f64>,
    #[serde(default)]
    pub rutas_adicionales: Vec<RutaAdicionalRequest>,
    pub ruta_regreso: Option<String>,
    pub kilometros_regreso: Option<f64>,
    pub litros_combustible: Option<f64>,
    pub costo_combustible: Option<f64>,
    pub notas: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RutaAdicionalRequest {
    pub ruta: Option<String>,
    pub kilometros: Option<f64>,
}

// Response de viaje, con la clasificación de eficiencia para despliegue
#[derive(Debug, Serialize)]
pub struct ViajeResponse {
    pub id: Uuid,
    pub fecha: NaiveDate,
    pub conductor_id: Option<Uuid>,
    pub conductor_nombre: Option<String>,
    pub camion_id: Option<Uuid>,
    pub camion_nombre: Option<String>,
    pub camion_placas: Option<String>,
    pub ruta_ida: String,
    pub kilometros_ida: f64,
    pub rutas_adicionales: Vec<RutaAdicional>,
    pub ruta_regreso: Option<String>,
    pub kilometros_regreso: Option<f64>,
    pub kilometros_total: f64,
    pub litros_combustible: f64,
    pub km_por_litro: f64,
    pub nivel_eficiencia: NivelEficiencia,
    pub costo_combustible: Option<f64>,
    pub notas: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Viaje> for ViajeResponse {
    fn from(viaje: Viaje) -> Self {
        Self {
            id: viaje.id,
            fecha: viaje.fecha,
            conductor_id: viaje.conductor_id,
            conductor_nombre: viaje.conductor_nombre,
            camion_id: viaje.camion_id,
            camion_nombre: viaje.camion_nombre,
            camion_placas: viaje.camion_placas,
            ruta_ida: viaje.ruta_ida,
            kilometros_ida: viaje.kilometros_ida,
            rutas_adicionales: viaje.rutas_adicionales.0,
            ruta_regreso: viaje.ruta_regreso,
            kilometros_regreso: viaje.kilometros_regreso,
            kilometros_total: viaje.kilometros_total,
            litros_combustible: viaje.litros_combustible,
            km_por_litro: viaje.km_por_litro,
            nivel_eficiencia: clasificar_eficiencia(viaje.km_por_litro),
            costo_combustible: viaje.costo_combustible,
            notas: viaje.notas,
            created_at: viaje.created_at,
        }
    }
}

// Query string de filtros. "todos" en conductor_id/camion_id equivale a no
// filtrar; el período acepta `todos`, `personalizado` o `semana-N`.
#[derive(Debug, Default, Deserialize)]
pub struct ViajeFilterQuery {
    pub fecha_inicio: Option<String>,
    pub fecha_fin: Option<String>,
    pub conductor_id: Option<String>,
    pub camion_id: Option<String>,
    pub ruta: Option<String>,
    pub periodo: Option<String>,
}

impl ViajeFilterQuery {
    /// Construir los filtros del dominio. Se aplica primero el período y
    /// después los campos manuales, de modo que la exclusión mutua entre
    /// semana y rango de fechas quede resuelta igual que en la interfaz.
    pub fn into_filters(self) -> Result<ViajeFilters, AppError> {
        let mut filters = ViajeFilters::new();

        if let Some(periodo) = self.periodo.as_deref() {
            let periodo = PeriodoFiltro::parse(periodo)
                .ok_or_else(|| AppError::BadRequest(format!("Período inválido: {}", periodo)))?;
            filters = filters.con_periodo(periodo);
        }

        if let Some(fecha) = self.fecha_inicio.as_deref().filter(|f| !f.is_empty()) {
            let fecha = validate_date(fecha)
                .map_err(|_| AppError::BadRequest(format!("Fecha inicial inválida: {}", fecha)))?;
            filters = filters.con_fecha_inicio(fecha);
        }

        if let Some(fecha) = self.fecha_fin.as_deref().filter(|f| !f.is_empty()) {
            let fecha = validate_date(fecha)
                .map_err(|_| AppError::BadRequest(format!("Fecha final inválida: {}", fecha)))?;
            filters = filters.con_fecha_fin(fecha);
        }

        if let Some(id) = self.conductor_id.as_deref().filter(|v| *v != "todos") {
            let id = validate_uuid(id)
                .map_err(|_| AppError::BadRequest(format!("Conductor inválido: {}", id)))?;
            filters = filters.con_conductor(id);
        }

        if let Some(id) = self.camion_id.as_deref().filter(|v| *v != "todos") {
            let id = validate_uuid(id)
                .map_err(|_| AppError::BadRequest(format!("Camión inválido: {}", id)))?;
            filters = filters.con_camion(id);
        }

        if let Some(ruta) = self.ruta.filter(|r| !r.trim().is_empty()) {
            filters = filters.con_ruta(ruta);
        }

        Ok(filters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_vacia_es_filtro_identidad() {
        let filters = ViajeFilterQuery::default().into_filters().unwrap();
        assert_eq!(filters.periodo(), PeriodoFiltro::Todos);
    }

    #[test]
    fn test_query_todos_no_filtra_por_entidad() {
        let query = ViajeFilterQuery {
            conductor_id: Some("todos".to_string()),
            camion_id: Some("todos".to_string()),
            ..Default::default()
        };
        assert!(query.into_filters().is_ok());
    }

    #[test]
    fn test_query_con_semana_ignora_fechas() {
        let query = ViajeFilterQuery {
            periodo: Some("semana-5".to_string()),
            ..Default::default()
        };
        let filters = query.into_filters().unwrap();
        assert_eq!(filters.periodo(), PeriodoFiltro::Semana(5));
    }

    #[test]
    fn test_query_fecha_manual_gana_sobre_semana() {
        // El período se aplica primero; una fecha manual presente en el mismo
        // query lo degrada a personalizado
        let query = ViajeFilterQuery {
            periodo: Some("semana-5".to_string()),
            fecha_inicio: Some("2026-02-01".to_string()),
            ..Default::default()
        };
        let filters = query.into_filters().unwrap();
        assert_eq!(filters.periodo(), PeriodoFiltro::Personalizado);
    }

    #[test]
    fn test_query_invalida() {
        let query = ViajeFilterQuery {
            fecha_inicio: Some("01/02/2026".to_string()),
            ..Default::default()
        };
        assert!(query.into_filters().is_err());

        let query = ViajeFilterQuery {
            periodo: Some("semana-99".to_string()),
            ..Default::default()
        };
        assert!(query.into_filters().is_err());

        let query = ViajeFilterQuery {
            conductor_id: Some("no-es-uuid".to_string()),
            ..Default::default()
        };
        assert!(query.into_filters().is_err());
    }
}
