//! Servicio JWT
//!
//! Emisión y validación de tokens de sesión HS256. El logout es del lado
//! del cliente: el token simplemente deja de enviarse.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::config::environment::EnvironmentConfig;
use crate::models::auth::JwtClaims;
use crate::models::user::Usuario;
use crate::utils::errors::AppError;

pub struct JwtService {
    algorithm: Algorithm,
    expiration: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new(config: &EnvironmentConfig) -> Self {
        Self {
            algorithm: Algorithm::HS256,
            expiration: Duration::hours(config.jwt_expiration_hours),
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_ref()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_ref()),
        }
    }

    /// Genera el token de sesión de un usuario
    pub fn generate_token(&self, usuario: &Usuario) -> Result<String, AppError> {
        let now = Utc::now();
        let exp = now + self.expiration;

        let claims = JwtClaims {
            sub: usuario.id.to_string(),
            email: usuario.email.clone(),
            nombre: usuario.nombre.clone(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Error generando token: {}", e)))
    }

    /// Valida y decodifica un token
    pub fn validate_token(&self, token: &str) -> Result<JwtClaims, AppError> {
        let validation = Validation::new(self.algorithm);

        decode::<JwtClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthorized("Token inválido o expirado".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn config() -> EnvironmentConfig {
        let mut config = EnvironmentConfig::default();
        config.jwt_secret = "secreto-de-prueba".to_string();
        config.jwt_expiration_hours = 24;
        config
    }

    fn usuario() -> Usuario {
        Usuario {
            id: Uuid::new_v4(),
            email: "operador@transportesgm.mx".to_string(),
            password_hash: String::new(),
            nombre: "Operador".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_token_redondo() {
        let service = JwtService::new(&config());
        let usuario = usuario();

        let token = service.generate_token(&usuario).unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.sub, usuario.id.to_string());
        assert_eq!(claims.email, usuario.email);
    }

    #[test]
    fn test_token_invalido_es_rechazado() {
        let service = JwtService::new(&config());
        assert!(service.validate_token("no-es-un-token").is_err());
    }

    #[test]
    fn test_token_con_otro_secreto_es_rechazado() {
        let service = JwtService::new(&config());
        let token = service.generate_token(&usuario()).unwrap();

        let mut otra = config();
        otra.jwt_secret = "otro-secreto".to_string();
        let otro_service = JwtService::new(&otra);
        assert!(otro_service.validate_token(&token).is_err());
    }
}
