use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::truck::Camion;

// Request para crear o actualizar un camión
#[derive(Debug, Deserialize)]
pub struct GuardarCamionRequest {
    pub nombre: Option<String>,
    pub placas: Option<String>,
    pub estado: Option<String>,
}

// Response de camión
#[derive(Debug, Serialize)]
pub struct CamionResponse {
    pub id: Uuid,
    pub nombre: String,
    pub placas: String,
    pub estado: String,
    pub created_at: DateTime<Utc>,
}

impl From<Camion> for CamionResponse {
    fn from(camion: Camion) -> Self {
        Self {
            id: camion.id,
            nombre: camion.nombre,
            placas: camion.placas,
            estado: camion.estado,
            created_at: camion.created_at,
        }
    }
}
