use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::truck_controller::CamionController;
use crate::dto::common::ApiResponse;
use crate::dto::truck_dto::{CamionResponse, GuardarCamionRequest};
use crate::services::metrics_service::EstadisticasEntidad;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_camion_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_camion))
        .route("/", get(list_camiones))
        .route("/:id", get(get_camion))
        .route("/:id", put(update_camion))
        .route("/:id", delete(delete_camion))
        .route("/:id/estadisticas", get(estadisticas_camion))
}

async fn create_camion(
    State(state): State<AppState>,
    Json(request): Json<GuardarCamionRequest>,
) -> Result<Json<ApiResponse<CamionResponse>>, AppError> {
    let controller = CamionController::new(state.pool.clone(), state.cache.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_camiones(
    State(state): State<AppState>,
) -> Result<Json<Vec<CamionResponse>>, AppError> {
    let controller = CamionController::new(state.pool.clone(), state.cache.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_camion(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CamionResponse>, AppError> {
    let controller = CamionController::new(state.pool.clone(), state.cache.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_camion(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<GuardarCamionRequest>,
) -> Result<Json<ApiResponse<CamionResponse>>, AppError> {
    let controller = CamionController::new(state.pool.clone(), state.cache.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_camion(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = CamionController::new(state.pool.clone(), state.cache.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Camión eliminado exitosamente"
    })))
}

async fn estadisticas_camion(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EstadisticasEntidad>, AppError> {
    let controller = CamionController::new(state.pool.clone(), state.cache.clone());
    let response = controller.estadisticas(id).await?;
    Ok(Json(response))
}
