use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::controllers::report_controller::ReporteController;
use crate::dto::trip_dto::ViajeFilterQuery;
use crate::services::metrics_service::{EficienciaRuta, PuntoConsumo, ResumenViajes};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_reporte_router() -> Router<AppState> {
    Router::new()
        .route("/resumen", get(resumen))
        .route("/consumo", get(consumo))
        .route("/eficiencia-rutas", get(eficiencia_rutas))
        .route("/export", get(export))
}

async fn resumen(
    State(state): State<AppState>,
    Query(query): Query<ViajeFilterQuery>,
) -> Result<Json<ResumenViajes>, AppError> {
    let controller = ReporteController::new(state.pool.clone(), state.cache.clone());
    let response = controller.resumen(query).await?;
    Ok(Json(response))
}

async fn consumo(
    State(state): State<AppState>,
    Query(query): Query<ViajeFilterQuery>,
) -> Result<Json<Vec<PuntoConsumo>>, AppError> {
    let controller = ReporteController::new(state.pool.clone(), state.cache.clone());
    let response = controller.consumo(query).await?;
    Ok(Json(response))
}

async fn eficiencia_rutas(
    State(state): State<AppState>,
    Query(query): Query<ViajeFilterQuery>,
) -> Result<Json<Vec<EficienciaRuta>>, AppError> {
    let controller = ReporteController::new(state.pool.clone(), state.cache.clone());
    let response = controller.eficiencia_rutas(query).await?;
    Ok(Json(response))
}

/// Descarga del CSV. Un subconjunto vacío responde 204 sin cuerpo: no hay
/// archivo que generar y no es un error.
async fn export(
    State(state): State<AppState>,
    Query(query): Query<ViajeFilterQuery>,
) -> Result<Response, AppError> {
    let controller = ReporteController::new(state.pool.clone(), state.cache.clone());

    match controller.export(query).await? {
        Some(reporte) => {
            let disposition = format!("attachment; filename=\"{}\"", reporte.filename);
            Ok((
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                reporte.contenido,
            )
                .into_response())
        }
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}
