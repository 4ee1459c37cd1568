//! Servicio de notificaciones
//!
//! Reenvía las solicitudes del formulario de contacto por correo a través
//! de la API de Resend. El detalle del fallo solo va al log; el cliente
//! recibe un mensaje genérico.

use reqwest::Client;
use serde_json::json;

use crate::config::environment::EnvironmentConfig;
use crate::dto::contact_dto::ContactRequest;
use crate::utils::errors::AppError;

const RESEND_URL: &str = "https://api.resend.com/emails";
const FROM_NAME: &str = "Transportes GM - Sitio Web";

pub struct NotificationService {
    client: Client,
    api_key: Option<String>,
    destino: String,
}

impl NotificationService {
    pub fn new(client: Client, config: &EnvironmentConfig) -> Self {
        Self {
            client,
            api_key: config.resend_api_key.clone(),
            destino: config.contact_email.clone(),
        }
    }

    /// Enviar una solicitud de cotización al correo de ventas
    pub async fn enviar_contacto(&self, solicitud: &ContactRequest) -> Result<(), AppError> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            AppError::Internal("La clave de API de Resend no está configurada".to_string())
        })?;

        let cuerpo = format!(
            "Nueva Solicitud de Cotización\n\
             --------------------------------\n\
             Nombre: {}\n\
             Email: {}\n\
             Teléfono: {}\n\
             Empresa: {}\n\
             --------------------------------\n\
             Mensaje:\n{}",
            solicitud.name,
            solicitud.email,
            solicitud.phone.as_deref().unwrap_or("No especificado"),
            solicitud.company.as_deref().unwrap_or("No especificada"),
            solicitud.message,
        );

        let response = self
            .client
            .post(RESEND_URL)
            .bearer_auth(api_key)
            .json(&json!({
                "from": format!("{} <onboarding@resend.dev>", FROM_NAME),
                "to": self.destino,
                "subject": format!("Nueva Cotización de: {}", solicitud.name),
                "text": cuerpo,
                "reply_to": solicitud.email,
            }))
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Error enviando correo: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let detalle = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Resend respondió {}: {}",
                status, detalle
            )));
        }

        log::info!("📧 Solicitud de contacto reenviada a {}", self.destino);
        Ok(())
    }
}
