//! Modelo de Camión
//!
//! Mapea exactamente a la tabla camiones.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Estados permitidos para un camión
pub const ESTADOS_CAMION: [&str; 3] = ["activo", "mantenimiento", "inactivo"];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Camion {
    pub id: Uuid,
    pub nombre: String,
    pub placas: String,
    pub estado: String,
    pub created_at: DateTime<Utc>,
}
