use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::driver::Conductor;
use crate::utils::errors::AppError;

pub struct ConductorRepository {
    pool: PgPool,
}

impl ConductorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        nombre: String,
        licencia: Option<String>,
        telefono: Option<String>,
        estado: String,
    ) -> Result<Conductor, AppError> {
        let conductor = sqlx::query_as::<_, Conductor>(
            r#"
            INSERT INTO conductores (id, nombre, licencia, telefono, estado, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(nombre)
        .bind(licencia)
        .bind(telefono)
        .bind(estado)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error creating conductor: {}", e)))?;

        Ok(conductor)
    }

    pub async fn find_all(&self) -> Result<Vec<Conductor>, AppError> {
        let conductores =
            sqlx::query_as::<_, Conductor>("SELECT * FROM conductores ORDER BY nombre")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| AppError::Database(format!("Error listing conductores: {}", e)))?;

        Ok(conductores)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Conductor>, AppError> {
        let conductor = sqlx::query_as::<_, Conductor>("SELECT * FROM conductores WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error finding conductor: {}", e)))?;

        Ok(conductor)
    }

    pub async fn update(
        &self,
        id: Uuid,
        nombre: String,
        licencia: Option<String>,
        telefono: Option<String>,
        estado: String,
    ) -> Result<Conductor, AppError> {
        let conductor = sqlx::query_as::<_, Conductor>(
            r#"
            UPDATE conductores
            SET nombre = $2, licencia = $3, telefono = $4, estado = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nombre)
        .bind(licencia)
        .bind(telefono)
        .bind(estado)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error updating conductor: {}", e)))?;

        Ok(conductor)
    }

    /// Eliminar un conductor. Los viajes que lo referencian no se tocan:
    /// conservan su snapshot de nombre y la referencia queda colgante.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM conductores WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error deleting conductor: {}", e)))?;

        Ok(())
    }
}
