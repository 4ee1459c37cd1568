use serde::{Deserialize, Serialize};
use validator::Validate;

// Request de login con email y password
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

// Response de login: token de sesión + datos del usuario
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub usuario: UsuarioResponse,
}

#[derive(Debug, Serialize)]
pub struct UsuarioResponse {
    pub id: String,
    pub email: String,
    pub nombre: String,
}
