use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::driver::Conductor;

// Request para crear o actualizar un conductor
#[derive(Debug, Deserialize)]
pub struct GuardarConductorRequest {
    pub nombre: Option<String>,
    pub licencia: Option<String>,
    pub telefono: Option<String>,
    pub estado: Option<String>,
}

// Response de conductor
#[derive(Debug, Serialize)]
pub struct ConductorResponse {
    pub id: Uuid,
    pub nombre: String,
    pub licencia: Option<String>,
    pub telefono: Option<String>,
    pub estado: String,
    pub created_at: DateTime<Utc>,
}

impl From<Conductor> for ConductorResponse {
    fn from(conductor: Conductor) -> Self {
        Self {
            id: conductor.id,
            nombre: conductor.nombre,
            licencia: conductor.licencia,
            telefono: conductor.telefono,
            estado: conductor.estado,
            created_at: conductor.created_at,
        }
    }
}
