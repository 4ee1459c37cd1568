use sqlx::PgPool;
use validator::Validate;

use crate::config::environment::EnvironmentConfig;
use crate::dto::auth_dto::{LoginRequest, LoginResponse, UsuarioResponse};
use crate::repositories::user_repository::UsuarioRepository;
use crate::services::jwt_service::JwtService;
use crate::utils::errors::AppError;

pub struct AuthController {
    usuarios: UsuarioRepository,
    jwt: JwtService,
}

impl AuthController {
    pub fn new(pool: PgPool, config: &EnvironmentConfig) -> Self {
        Self {
            usuarios: UsuarioRepository::new(pool),
            jwt: JwtService::new(config),
        }
    }

    /// Iniciar sesión con email y password. El mensaje de error no distingue
    /// entre usuario inexistente y password incorrecta.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        request.validate()?;

        let usuario = self
            .usuarios
            .find_by_email(&request.email)
            .await?
            .ok_or_else(credenciales_invalidas)?;

        let valida = bcrypt::verify(&request.password, &usuario.password_hash)
            .map_err(|e| AppError::Internal(format!("Error verificando credenciales: {}", e)))?;
        if !valida {
            return Err(credenciales_invalidas());
        }

        let token = self.jwt.generate_token(&usuario)?;

        Ok(LoginResponse {
            token,
            usuario: UsuarioResponse {
                id: usuario.id.to_string(),
                email: usuario.email,
                nombre: usuario.nombre,
            },
        })
    }
}

fn credenciales_invalidas() -> AppError {
    AppError::Unauthorized("Credenciales inválidas. Por favor, inténtalo de nuevo.".to_string())
}
