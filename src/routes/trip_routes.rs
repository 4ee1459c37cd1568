use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::trip_controller::ViajeController;
use crate::dto::common::ApiResponse;
use crate::dto::trip_dto::{GuardarViajeRequest, ViajeFilterQuery, ViajeResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_viaje_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_viaje))
        .route("/", get(list_viajes))
        .route("/:id", get(get_viaje))
        .route("/:id", put(update_viaje))
        .route("/:id", delete(delete_viaje))
}

async fn create_viaje(
    State(state): State<AppState>,
    Json(request): Json<GuardarViajeRequest>,
) -> Result<Json<ApiResponse<ViajeResponse>>, AppError> {
    let controller = ViajeController::new(state.pool.clone(), state.cache.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_viajes(
    State(state): State<AppState>,
    Query(query): Query<ViajeFilterQuery>,
) -> Result<Json<Vec<ViajeResponse>>, AppError> {
    let controller = ViajeController::new(state.pool.clone(), state.cache.clone());
    let response = controller.list(query).await?;
    Ok(Json(response))
}

async fn get_viaje(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ViajeResponse>, AppError> {
    let controller = ViajeController::new(state.pool.clone(), state.cache.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_viaje(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<GuardarViajeRequest>,
) -> Result<Json<ApiResponse<ViajeResponse>>, AppError> {
    let controller = ViajeController::new(state.pool.clone(), state.cache.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_viaje(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = ViajeController::new(state.pool.clone(), state.cache.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Viaje eliminado exitosamente"
    })))
}
