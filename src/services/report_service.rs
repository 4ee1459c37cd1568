//! Exportación de reportes
//!
//! Serializa el conjunto de viajes visibles a CSV para descarga. El archivo
//! lleva BOM al inicio para que las hojas de cálculo muestren bien los
//! acentos. Un conjunto vacío no produce archivo: es un no-op deliberado,
//! no un error.

use chrono::{Local, NaiveDate};

use crate::models::trip::Viaje;

const ENCABEZADOS: [&str; 10] = [
    "Fecha",
    "Conductor",
    "Ruta Ida",
    "Kilómetros Ida",
    "Ruta Regreso",
    "Kilómetros Regreso",
    "Kilómetros Total",
    "Litros",
    "km/L",
    "Costo",
];

/// Archivo CSV generado, listo para servir como descarga
#[derive(Debug, Clone)]
pub struct ReporteCsv {
    pub filename: String,
    pub contenido: Vec<u8>,
}

/// Exportar los viajes visibles. Devuelve `None` cuando la lista está vacía.
pub fn exportar_viajes(viajes: &[Viaje]) -> Option<ReporteCsv> {
    exportar_viajes_con_fecha(viajes, Local::now().date_naive())
}

/// Variante con fecha explícita para el nombre del archivo
pub fn exportar_viajes_con_fecha(viajes: &[Viaje], hoy: NaiveDate) -> Option<ReporteCsv> {
    if viajes.is_empty() {
        return None;
    }

    let mut lineas = Vec::with_capacity(viajes.len() + 1);
    lineas.push(ENCABEZADOS.join(","));

    for viaje in viajes {
        lineas.push(fila_csv(viaje));
    }

    // BOM para que Excel interprete el archivo como UTF-8
    let contenido = format!("\u{feff}{}", lineas.join("\n")).into_bytes();

    Some(ReporteCsv {
        filename: format!("reporte_viajes_{}.csv", hoy.format("%Y-%m-%d")),
        contenido,
    })
}

fn fila_csv(viaje: &Viaje) -> String {
    let conductor = viaje
        .conductor_nombre
        .as_deref()
        .filter(|n| !n.is_empty())
        .unwrap_or("N/A");
    let ruta_ida = if viaje.ruta_ida.is_empty() {
        "-"
    } else {
        viaje.ruta_ida.as_str()
    };
    let ruta_regreso = viaje
        .ruta_regreso
        .as_deref()
        .filter(|r| !r.is_empty())
        .unwrap_or("-");
    let km_regreso = match viaje.kilometros_regreso {
        Some(km) => km.to_string(),
        None => campo_texto("-"),
    };

    [
        campo_texto(&viaje.fecha.format("%d/%m/%Y").to_string()),
        campo_texto(conductor),
        campo_texto(ruta_ida),
        viaje.kilometros_ida.to_string(),
        campo_texto(ruta_regreso),
        km_regreso,
        viaje.kilometros_total.to_string(),
        viaje.litros_combustible.to_string(),
        campo_texto(&format!("{:.2}", viaje.km_por_litro)),
        viaje.costo_combustible.unwrap_or(0.0).to_string(),
    ]
    .join(",")
}

/// Campo de texto entre comillas, con comillas internas duplicadas
fn campo_texto(valor: &str) -> String {
    format!("\"{}\"", valor.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sqlx::types::Json;
    use uuid::Uuid;

    fn viaje() -> Viaje {
        Viaje {
            id: Uuid::new_v4(),
            fecha: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
            conductor_id: Some(Uuid::new_v4()),
            conductor_nombre: Some("Juan Pérez".to_string()),
            camion_id: Some(Uuid::new_v4()),
            camion_nombre: Some("Kenworth 01".to_string()),
            camion_placas: Some("ABC-123".to_string()),
            ruta_ida: "SLP - CDMX".to_string(),
            kilometros_ida: 420.0,
            rutas_adicionales: Json(vec![]),
            ruta_regreso: Some("CDMX - SLP".to_string()),
            kilometros_regreso: Some(420.0),
            kilometros_total: 840.0,
            litros_combustible: 350.0,
            km_por_litro: 2.4,
            costo_combustible: Some(8750.0),
            notas: None,
            created_at: Utc::now(),
        }
    }

    fn hoy() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 5).unwrap()
    }

    #[test]
    fn test_lista_vacia_no_genera_archivo() {
        assert!(exportar_viajes_con_fecha(&[], hoy()).is_none());
    }

    #[test]
    fn test_reporte_lleva_bom_y_encabezado() {
        let reporte = exportar_viajes_con_fecha(&[viaje()], hoy()).unwrap();
        assert!(reporte.contenido.starts_with(&[0xEF, 0xBB, 0xBF]));

        let texto = String::from_utf8(reporte.contenido).unwrap();
        let primera_linea = texto.trim_start_matches('\u{feff}').lines().next().unwrap();
        assert!(primera_linea.starts_with("Fecha,Conductor,Ruta Ida"));
        assert!(primera_linea.ends_with("km/L,Costo"));
    }

    #[test]
    fn test_nombre_de_archivo_con_fecha() {
        let reporte = exportar_viajes_con_fecha(&[viaje()], hoy()).unwrap();
        assert_eq!(reporte.filename, "reporte_viajes_2026-08-05.csv");
    }

    #[test]
    fn test_fila_con_todos_los_campos() {
        let fila = fila_csv(&viaje());
        assert_eq!(
            fila,
            "\"15/03/2026\",\"Juan Pérez\",\"SLP - CDMX\",420,\"CDMX - SLP\",420,840,350,\"2.40\",8750"
        );
    }

    #[test]
    fn test_fila_con_campos_ausentes() {
        let mut v = viaje();
        v.conductor_nombre = None;
        v.ruta_regreso = None;
        v.kilometros_regreso = None;
        v.costo_combustible = None;

        let fila = fila_csv(&v);
        assert!(fila.contains("\"N/A\""));
        assert!(fila.contains("\"-\""));
        assert!(fila.ends_with(",0"));
    }

    #[test]
    fn test_comillas_internas_escapadas() {
        let mut v = viaje();
        v.ruta_ida = "Ruta \"Express\"".to_string();
        let fila = fila_csv(&v);
        assert!(fila.contains("\"Ruta \"\"Express\"\"\""));
    }
}
