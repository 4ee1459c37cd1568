//! Modelo de Unidad
//!
//! Entidad de exhibición de la flota. Este servicio solo la lista; no hay
//! operaciones de escritura sobre unidades.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Unidad {
    pub id: Uuid,
    pub marca: String,
    pub modelo: String,
    pub anio: Option<i32>,
    pub placa: Option<String>,
    pub estado: String,
    pub imagen_url: Option<String>,
    pub created_at: DateTime<Utc>,
}
