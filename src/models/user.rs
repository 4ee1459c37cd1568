//! Modelo de Usuario
//!
//! Usuarios de la aplicación para el login por email/password.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct Usuario {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub nombre: String,
    pub created_at: DateTime<Utc>,
}
