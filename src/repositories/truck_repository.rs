use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::truck::Camion;
use crate::utils::errors::AppError;

pub struct CamionRepository {
    pool: PgPool,
}

impl CamionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        nombre: String,
        placas: String,
        estado: String,
    ) -> Result<Camion, AppError> {
        let camion = sqlx::query_as::<_, Camion>(
            r#"
            INSERT INTO camiones (id, nombre, placas, estado, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(nombre)
        .bind(placas)
        .bind(estado)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error creating camion: {}", e)))?;

        Ok(camion)
    }

    pub async fn find_all(&self) -> Result<Vec<Camion>, AppError> {
        let camiones = sqlx::query_as::<_, Camion>("SELECT * FROM camiones ORDER BY nombre")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error listing camiones: {}", e)))?;

        Ok(camiones)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Camion>, AppError> {
        let camion = sqlx::query_as::<_, Camion>("SELECT * FROM camiones WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error finding camion: {}", e)))?;

        Ok(camion)
    }

    pub async fn update(
        &self,
        id: Uuid,
        nombre: String,
        placas: String,
        estado: String,
    ) -> Result<Camion, AppError> {
        let camion = sqlx::query_as::<_, Camion>(
            r#"
            UPDATE camiones
            SET nombre = $2, placas = $3, estado = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nombre)
        .bind(placas)
        .bind(estado)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error updating camion: {}", e)))?;

        Ok(camion)
    }

    /// Eliminar un camión. Igual que con conductores, los viajes conservan
    /// su snapshot y la referencia queda colgante.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM camiones WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error deleting camion: {}", e)))?;

        Ok(())
    }
}
