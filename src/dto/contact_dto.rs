use serde::Deserialize;
use validator::Validate;

// Payload del formulario de contacto
#[derive(Debug, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    #[validate(length(min = 1, max = 5000))]
    pub message: String,
}
