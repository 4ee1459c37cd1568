use sqlx::PgPool;

use crate::models::unit::Unidad;
use crate::utils::errors::AppError;

pub struct UnidadRepository {
    pool: PgPool,
}

impl UnidadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Listado de la flota, ordenado por marca y modelo
    pub async fn find_all(&self) -> Result<Vec<Unidad>, AppError> {
        let unidades =
            sqlx::query_as::<_, Unidad>("SELECT * FROM unidades ORDER BY marca, modelo")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| AppError::Database(format!("Error listing unidades: {}", e)))?;

        Ok(unidades)
    }
}
