//! Modelos de autenticación

use serde::{Deserialize, Serialize};

/// Claims del token JWT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub email: String,
    pub nombre: String,
    pub exp: i64,
    pub iat: i64,
}

/// Usuario autenticado extraído del token, disponible como extensión del request
#[derive(Debug, Clone)]
pub struct UsuarioAutenticado {
    pub id: String,
    pub email: String,
    pub nombre: String,
}
