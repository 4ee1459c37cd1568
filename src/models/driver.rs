//! Modelo de Conductor
//!
//! Mapea exactamente a la tabla conductores. Los viajes guardan un snapshot
//! del nombre al momento de escritura, por lo que renombrar o eliminar un
//! conductor nunca toca los viajes existentes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Estados permitidos para un conductor
pub const ESTADOS_CONDUCTOR: [&str; 2] = ["activo", "inactivo"];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Conductor {
    pub id: Uuid,
    pub nombre: String,
    pub licencia: Option<String>,
    pub telefono: Option<String>,
    pub estado: String,
    pub created_at: DateTime<Utc>,
}
