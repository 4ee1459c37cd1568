use chrono::{NaiveDate, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::trip::{RutaAdicional, Viaje};
use crate::utils::errors::AppError;

/// Registro completo de un viaje listo para persistir. El controlador ya
/// validó los obligatorios, calculó los derivados y tomó los snapshots.
#[derive(Debug, Clone)]
pub struct ViajeDatos {
    pub fecha: NaiveDate,
    pub conductor_id: Option<Uuid>,
    pub conductor_nombre: Option<String>,
    pub camion_id: Option<Uuid>,
    pub camion_nombre: Option<String>,
    pub camion_placas: Option<String>,
    pub ruta_ida: String,
    pub kilometros_ida: f64,
    pub rutas_adicionales: Vec<RutaAdicional>,
    pub ruta_regreso: Option<String>,
    pub kilometros_regreso: Option<f64>,
    pub kilometros_total: f64,
    pub litros_combustible: f64,
    pub km_por_litro: f64,
    pub costo_combustible: Option<f64>,
    pub notas: Option<String>,
}

pub struct ViajeRepository {
    pool: PgPool,
}

impl ViajeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, datos: ViajeDatos) -> Result<Viaje, AppError> {
        let viaje = sqlx::query_as::<_, Viaje>(
            r#"
            INSERT INTO viajes (
                id, fecha, conductor_id, conductor_nombre, camion_id, camion_nombre,
                camion_placas, ruta_ida, kilometros_ida, rutas_adicionales, ruta_regreso,
                kilometros_regreso, kilometros_total, litros_combustible, km_por_litro,
                costo_combustible, notas, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(datos.fecha)
        .bind(datos.conductor_id)
        .bind(datos.conductor_nombre)
        .bind(datos.camion_id)
        .bind(datos.camion_nombre)
        .bind(datos.camion_placas)
        .bind(datos.ruta_ida)
        .bind(datos.kilometros_ida)
        .bind(Json(datos.rutas_adicionales))
        .bind(datos.ruta_regreso)
        .bind(datos.kilometros_regreso)
        .bind(datos.kilometros_total)
        .bind(datos.litros_combustible)
        .bind(datos.km_por_litro)
        .bind(datos.costo_combustible)
        .bind(datos.notas)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error creating viaje: {}", e)))?;

        Ok(viaje)
    }

    /// Listado completo, del viaje más reciente al más antiguo
    pub async fn find_all(&self) -> Result<Vec<Viaje>, AppError> {
        let viajes = sqlx::query_as::<_, Viaje>(
            "SELECT * FROM viajes ORDER BY fecha DESC, created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listing viajes: {}", e)))?;

        Ok(viajes)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Viaje>, AppError> {
        let viaje = sqlx::query_as::<_, Viaje>("SELECT * FROM viajes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error finding viaje: {}", e)))?;

        Ok(viaje)
    }

    pub async fn find_by_conductor(&self, conductor_id: Uuid) -> Result<Vec<Viaje>, AppError> {
        let viajes = sqlx::query_as::<_, Viaje>(
            "SELECT * FROM viajes WHERE conductor_id = $1 ORDER BY fecha DESC, created_at DESC",
        )
        .bind(conductor_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listing viajes by conductor: {}", e)))?;

        Ok(viajes)
    }

    pub async fn find_by_camion(&self, camion_id: Uuid) -> Result<Vec<Viaje>, AppError> {
        let viajes = sqlx::query_as::<_, Viaje>(
            "SELECT * FROM viajes WHERE camion_id = $1 ORDER BY fecha DESC, created_at DESC",
        )
        .bind(camion_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listing viajes by camion: {}", e)))?;

        Ok(viajes)
    }

    /// Reemplazo completo del registro: el borrador validado trae todos los
    /// campos, incluidos los derivados recalculados.
    pub async fn update(&self, id: Uuid, datos: ViajeDatos) -> Result<Viaje, AppError> {
        let viaje = sqlx::query_as::<_, Viaje>(
            r#"
            UPDATE viajes
            SET fecha = $2, conductor_id = $3, conductor_nombre = $4, camion_id = $5,
                camion_nombre = $6, camion_placas = $7, ruta_ida = $8, kilometros_ida = $9,
                rutas_adicionales = $10, ruta_regreso = $11, kilometros_regreso = $12,
                kilometros_total = $13, litros_combustible = $14, km_por_litro = $15,
                costo_combustible = $16, notas = $17
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(datos.fecha)
        .bind(datos.conductor_id)
        .bind(datos.conductor_nombre)
        .bind(datos.camion_id)
        .bind(datos.camion_nombre)
        .bind(datos.camion_placas)
        .bind(datos.ruta_ida)
        .bind(datos.kilometros_ida)
        .bind(Json(datos.rutas_adicionales))
        .bind(datos.ruta_regreso)
        .bind(datos.kilometros_regreso)
        .bind(datos.kilometros_total)
        .bind(datos.litros_combustible)
        .bind(datos.km_por_litro)
        .bind(datos.costo_combustible)
        .bind(datos.notas)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error updating viaje: {}", e)))?;

        Ok(viaje)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM viajes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error deleting viaje: {}", e)))?;

        Ok(())
    }
}
