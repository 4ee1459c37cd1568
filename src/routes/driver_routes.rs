use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::driver_controller::ConductorController;
use crate::dto::common::ApiResponse;
use crate::dto::driver_dto::{ConductorResponse, GuardarConductorRequest};
use crate::services::metrics_service::EstadisticasEntidad;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_conductor_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_conductor))
        .route("/", get(list_conductores))
        .route("/:id", get(get_conductor))
        .route("/:id", put(update_conductor))
        .route("/:id", delete(delete_conductor))
        .route("/:id/estadisticas", get(estadisticas_conductor))
}

async fn create_conductor(
    State(state): State<AppState>,
    Json(request): Json<GuardarConductorRequest>,
) -> Result<Json<ApiResponse<ConductorResponse>>, AppError> {
    let controller = ConductorController::new(state.pool.clone(), state.cache.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_conductores(
    State(state): State<AppState>,
) -> Result<Json<Vec<ConductorResponse>>, AppError> {
    let controller = ConductorController::new(state.pool.clone(), state.cache.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_conductor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ConductorResponse>, AppError> {
    let controller = ConductorController::new(state.pool.clone(), state.cache.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_conductor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<GuardarConductorRequest>,
) -> Result<Json<ApiResponse<ConductorResponse>>, AppError> {
    let controller = ConductorController::new(state.pool.clone(), state.cache.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_conductor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = ConductorController::new(state.pool.clone(), state.cache.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Conductor eliminado exitosamente"
    })))
}

async fn estadisticas_conductor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EstadisticasEntidad>, AppError> {
    let controller = ConductorController::new(state.pool.clone(), state.cache.clone());
    let response = controller.estadisticas(id).await?;
    Ok(Json(response))
}
