use axum::{extract::State, routing::post, Extension, Json, Router};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{LoginRequest, LoginResponse, UsuarioResponse};
use crate::models::auth::UsuarioAutenticado;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let controller = AuthController::new(state.pool.clone(), &state.config);
    let response = controller.login(request).await?;
    Ok(Json(response))
}

/// El cierre de sesión es stateless: el token simplemente se descarta en el
/// cliente.
async fn logout() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "success": true,
        "message": "Sesión cerrada"
    }))
}

/// Usuario de la sesión actual (requiere el middleware de autenticación)
pub async fn me(
    Extension(usuario): Extension<UsuarioAutenticado>,
) -> Result<Json<UsuarioResponse>, AppError> {
    Ok(Json(UsuarioResponse {
        id: usuario.id,
        email: usuario.email,
        nombre: usuario.nombre,
    }))
}
