//! Middleware de autenticación
//!
//! Valida el Bearer token y deja el usuario autenticado como extensión del
//! request. La presencia de sesión es lo único que controla el acceso a las
//! pantallas de combustible; la redirección al login es trabajo del cliente.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::models::auth::UsuarioAutenticado;
use crate::services::jwt_service::JwtService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Falta el encabezado Authorization".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Formato de Authorization inválido".to_string()))?;

    let jwt = JwtService::new(&state.config);
    let claims = jwt.validate_token(token)?;

    request.extensions_mut().insert(UsuarioAutenticado {
        id: claims.sub,
        email: claims.email,
        nombre: claims.nombre,
    });

    Ok(next.run(request).await)
}
