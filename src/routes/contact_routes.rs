use axum::{extract::State, routing::post, Json, Router};
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::contact_dto::ContactRequest;
use crate::services::notification_service::NotificationService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_contacto_router() -> Router<AppState> {
    Router::new().route("/", post(enviar_contacto))
}

async fn enviar_contacto(
    State(state): State<AppState>,
    Json(request): Json<ContactRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    request.validate()?;

    let service = NotificationService::new(state.http_client.clone(), &state.config);
    service.enviar_contacto(&request).await?;

    Ok(Json(ApiResponse::success_with_message(
        (),
        "Mensaje enviado exitosamente".to_string(),
    )))
}
