use axum::{extract::State, routing::get, Json, Router};

use crate::controllers::unit_controller::UnidadController;
use crate::models::unit::Unidad;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_unidad_router() -> Router<AppState> {
    Router::new().route("/", get(list_unidades))
}

async fn list_unidades(State(state): State<AppState>) -> Result<Json<Vec<Unidad>>, AppError> {
    let controller = UnidadController::new(state.pool.clone(), state.cache.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}
