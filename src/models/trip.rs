//! Modelo de Viaje
//!
//! Un viaje registra un movimiento con consumo de combustible: ruta de ida,
//! rutas adicionales opcionales y ruta de regreso. Los campos
//! `kilometros_total` y `km_por_litro` son derivados y se recalculan en cada
//! escritura; nunca se confía en el valor almacenado como entrada.
//! `conductor_*` y `camion_*` son snapshots tomados al momento de guardar y
//! no se actualizan retroactivamente.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Tramo adicional de un viaje: etiqueta de ruta + kilómetros
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RutaAdicional {
    pub ruta: String,
    pub kilometros: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Viaje {
    pub id: Uuid,
    pub fecha: NaiveDate,
    pub conductor_id: Option<Uuid>,
    pub conductor_nombre: Option<String>,
    pub camion_id: Option<Uuid>,
    pub camion_nombre: Option<String>,
    pub camion_placas: Option<String>,
    pub ruta_ida: String,
    pub kilometros_ida: f64,
    pub rutas_adicionales: Json<Vec<RutaAdicional>>,
    pub ruta_regreso: Option<String>,
    pub kilometros_regreso: Option<f64>,
    pub kilometros_total: f64,
    pub litros_combustible: f64,
    pub km_por_litro: f64,
    pub costo_combustible: Option<f64>,
    pub notas: Option<String>,
    pub created_at: DateTime<Utc>,
}
