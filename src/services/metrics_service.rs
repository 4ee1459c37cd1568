//! Cálculo de métricas derivadas
//!
//! Funciones puras que calculan kilómetros totales, eficiencia (km/L) y
//! agregados sobre conjuntos de viajes. La validación de entradas es
//! responsabilidad del controlador; aquí un litraje no positivo solo
//! produce eficiencia 0, nunca una división entre cero.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::models::trip::{RutaAdicional, Viaje};

/// Umbral por encima del cual la eficiencia se considera buena
pub const UMBRAL_EFICIENCIA_BUENA: f64 = 2.25;
/// Umbral por debajo del cual la eficiencia se considera baja
pub const UMBRAL_EFICIENCIA_REGULAR: f64 = 2.0;

/// Totales derivados de un viaje
#[derive(Debug, Clone, PartialEq)]
pub struct ViajeTotales {
    pub kilometros_total: f64,
    pub km_por_litro: f64,
}

/// Calcular kilómetros totales y eficiencia de un borrador de viaje.
/// Los tramos ausentes cuentan como 0.
pub fn calcular_totales(
    kilometros_ida: f64,
    rutas_adicionales: &[RutaAdicional],
    kilometros_regreso: Option<f64>,
    litros_combustible: f64,
) -> ViajeTotales {
    let km_adicionales: f64 = rutas_adicionales.iter().map(|r| r.kilometros).sum();
    let kilometros_total = kilometros_ida + km_adicionales + kilometros_regreso.unwrap_or(0.0);

    let km_por_litro = if litros_combustible > 0.0 {
        kilometros_total / litros_combustible
    } else {
        0.0
    };

    ViajeTotales {
        kilometros_total,
        km_por_litro,
    }
}

/// Resumen agregado de un conjunto de viajes
#[derive(Debug, Clone, Serialize)]
pub struct ResumenViajes {
    pub total_viajes: usize,
    pub total_km: f64,
    pub total_litros: f64,
    pub promedio_eficiencia: f64,
    pub total_costo: f64,
}

/// Agregar un conjunto de viajes. La eficiencia promedio se pondera por
/// volumen (Σkm / Σlitros), no es el promedio de las eficiencias
/// individuales, y queda en 0 cuando el total de litros es 0.
pub fn resumen(viajes: &[Viaje]) -> ResumenViajes {
    let total_km: f64 = viajes.iter().map(|v| v.kilometros_total).sum();
    let total_litros: f64 = viajes.iter().map(|v| v.litros_combustible).sum();
    let total_costo: f64 = viajes.iter().filter_map(|v| v.costo_combustible).sum();

    let promedio_eficiencia = if total_litros > 0.0 {
        total_km / total_litros
    } else {
        0.0
    };

    ResumenViajes {
        total_viajes: viajes.len(),
        total_km,
        total_litros,
        promedio_eficiencia,
        total_costo,
    }
}

/// Clasificación de eficiencia para despliegue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NivelEficiencia {
    Buena,
    Regular,
    Baja,
}

/// Clasificar una eficiencia km/L. El límite superior de la banda regular
/// es inclusivo: exactamente 2.25 sigue siendo regular.
pub fn clasificar_eficiencia(km_por_litro: f64) -> NivelEficiencia {
    if km_por_litro > UMBRAL_EFICIENCIA_BUENA {
        NivelEficiencia::Buena
    } else if km_por_litro >= UMBRAL_EFICIENCIA_REGULAR {
        NivelEficiencia::Regular
    } else {
        NivelEficiencia::Baja
    }
}

/// Eficiencia agregada de una ruta de ida
#[derive(Debug, Clone, Serialize)]
pub struct EficienciaRuta {
    pub ruta: String,
    pub eficiencia: f64,
    pub viajes: usize,
}

const MAX_RUTAS_GRAFICO: usize = 8;
const MAX_LARGO_ETIQUETA: usize = 20;

/// Agrupar viajes por ruta de ida y calcular la eficiencia ponderada de cada
/// ruta, ordenada de mayor a menor. Se devuelven las 8 mejores rutas con
/// etiquetas recortadas a 20 caracteres.
pub fn eficiencia_por_ruta(viajes: &[Viaje]) -> Vec<EficienciaRuta> {
    let mut stats: HashMap<&str, (f64, f64, usize)> = HashMap::new();

    for viaje in viajes {
        let ruta = if viaje.ruta_ida.is_empty() {
            "Sin ruta"
        } else {
            viaje.ruta_ida.as_str()
        };
        let entry = stats.entry(ruta).or_insert((0.0, 0.0, 0));
        entry.0 += viaje.kilometros_total;
        entry.1 += viaje.litros_combustible;
        entry.2 += 1;
    }

    let mut rutas: Vec<EficienciaRuta> = stats
        .into_iter()
        .map(|(ruta, (km, litros, count))| EficienciaRuta {
            ruta: recortar_etiqueta(ruta),
            eficiencia: if litros > 0.0 { km / litros } else { 0.0 },
            viajes: count,
        })
        .collect();

    rutas.sort_by(|a, b| {
        b.eficiencia
            .partial_cmp(&a.eficiencia)
            .unwrap_or(Ordering::Equal)
    });
    rutas.truncate(MAX_RUTAS_GRAFICO);
    rutas
}

fn recortar_etiqueta(ruta: &str) -> String {
    if ruta.chars().count() > MAX_LARGO_ETIQUETA {
        let recortada: String = ruta.chars().take(MAX_LARGO_ETIQUETA).collect();
        format!("{}...", recortada)
    } else {
        ruta.to_string()
    }
}

/// Punto de la tendencia de consumo
#[derive(Debug, Clone, Serialize)]
pub struct PuntoConsumo {
    pub fecha: String,
    pub litros: f64,
    pub km: f64,
}

const MAX_PUNTOS_TENDENCIA: usize = 10;

/// Tendencia de consumo: los 10 viajes más recientes en orden cronológico.
/// Espera la colección ordenada por fecha descendente, como la entrega el
/// repositorio.
pub fn tendencia_consumo(viajes: &[Viaje]) -> Vec<PuntoConsumo> {
    viajes
        .iter()
        .take(MAX_PUNTOS_TENDENCIA)
        .rev()
        .map(|viaje| PuntoConsumo {
            fecha: viaje.fecha.format("%d/%m").to_string(),
            litros: viaje.litros_combustible,
            km: viaje.kilometros_total,
        })
        .collect()
}

/// Estadísticas de viajes de un conductor o camión
#[derive(Debug, Clone, Serialize)]
pub struct EstadisticasEntidad {
    pub total_viajes: usize,
    pub total_km: f64,
    pub promedio: f64,
}

/// Estadísticas agregadas de los viajes de una entidad, con el mismo
/// promedio ponderado por volumen que el resumen general.
pub fn estadisticas(viajes: &[Viaje]) -> EstadisticasEntidad {
    let agregado = resumen(viajes);
    EstadisticasEntidad {
        total_viajes: agregado.total_viajes,
        total_km: agregado.total_km,
        promedio: agregado.promedio_eficiencia,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use sqlx::types::Json;
    use uuid::Uuid;

    fn viaje(fecha: &str, ruta: &str, km_total: f64, litros: f64, costo: Option<f64>) -> Viaje {
        Viaje {
            id: Uuid::new_v4(),
            fecha: NaiveDate::parse_from_str(fecha, "%Y-%m-%d").unwrap(),
            conductor_id: None,
            conductor_nombre: None,
            camion_id: None,
            camion_nombre: None,
            camion_placas: None,
            ruta_ida: ruta.to_string(),
            kilometros_ida: km_total,
            rutas_adicionales: Json(vec![]),
            ruta_regreso: None,
            kilometros_regreso: None,
            kilometros_total: km_total,
            litros_combustible: litros,
            km_por_litro: if litros > 0.0 { km_total / litros } else { 0.0 },
            costo_combustible: costo,
            notas: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_calcular_totales_suma_todos_los_tramos() {
        let adicionales = vec![
            RutaAdicional {
                ruta: "CEDIS Norte".to_string(),
                kilometros: 50.0,
            },
            RutaAdicional {
                ruta: "CEDIS Sur".to_string(),
                kilometros: 30.0,
            },
        ];
        let totales = calcular_totales(300.0, &adicionales, Some(220.0), 200.0);
        assert_eq!(totales.kilometros_total, 600.0);
        assert_eq!(totales.km_por_litro, 3.0);
    }

    #[test]
    fn test_calcular_totales_sin_regreso() {
        let totales = calcular_totales(120.0, &[], None, 60.0);
        assert_eq!(totales.kilometros_total, 120.0);
        assert_eq!(totales.km_por_litro, 2.0);
    }

    #[test]
    fn test_calcular_totales_litros_cero_no_divide() {
        let totales = calcular_totales(100.0, &[], Some(100.0), 0.0);
        assert_eq!(totales.kilometros_total, 200.0);
        assert_eq!(totales.km_por_litro, 0.0);
    }

    #[test]
    fn test_totales_ignoran_valor_almacenado() {
        // Un registro con kilometros_total desactualizado: el cálculo parte
        // siempre de los tramos, nunca del campo almacenado.
        let mut v = viaje("2026-03-10", "SLP - CDMX", 999.0, 100.0, None);
        v.kilometros_ida = 150.0;
        v.kilometros_regreso = Some(150.0);
        let totales = calcular_totales(
            v.kilometros_ida,
            &v.rutas_adicionales.0,
            v.kilometros_regreso,
            v.litros_combustible,
        );
        assert_eq!(totales.kilometros_total, 300.0);
    }

    #[test]
    fn test_resumen_pondera_por_volumen() {
        // Eficiencias individuales 3.0 y 0.33; el promedio simple sería ~1.67
        let viajes = vec![
            viaje("2026-01-05", "SLP - CDMX", 300.0, 100.0, Some(2500.0)),
            viaje("2026-01-06", "SLP - QRO", 100.0, 300.0, None),
        ];
        let r = resumen(&viajes);
        assert_eq!(r.total_viajes, 2);
        assert_eq!(r.total_km, 400.0);
        assert_eq!(r.total_litros, 400.0);
        assert_eq!(r.promedio_eficiencia, 1.0);
        assert_eq!(r.total_costo, 2500.0);
    }

    #[test]
    fn test_resumen_litros_cero_nunca_es_nan() {
        let viajes = vec![
            viaje("2026-01-05", "SLP - CDMX", 300.0, 0.0, None),
            viaje("2026-01-06", "SLP - QRO", 100.0, 0.0, None),
        ];
        let r = resumen(&viajes);
        assert_eq!(r.promedio_eficiencia, 0.0);
        assert!(!r.promedio_eficiencia.is_nan());
    }

    #[test]
    fn test_resumen_vacio() {
        let r = resumen(&[]);
        assert_eq!(r.total_viajes, 0);
        assert_eq!(r.promedio_eficiencia, 0.0);
    }

    #[test]
    fn test_clasificar_eficiencia_limites() {
        assert_eq!(clasificar_eficiencia(2.26), NivelEficiencia::Buena);
        // Exactamente 2.25 cae en la banda regular, no en la buena
        assert_eq!(clasificar_eficiencia(2.25), NivelEficiencia::Regular);
        assert_eq!(clasificar_eficiencia(2.0), NivelEficiencia::Regular);
        assert_eq!(clasificar_eficiencia(1.99), NivelEficiencia::Baja);
        assert_eq!(clasificar_eficiencia(0.0), NivelEficiencia::Baja);
    }

    #[test]
    fn test_viaje_redondo_en_el_limite() {
        // 225 km ida + 225 km regreso con 200 L: exactamente 2.25 km/L
        let totales = calcular_totales(225.0, &[], Some(225.0), 200.0);
        assert_eq!(totales.kilometros_total, 450.0);
        assert_eq!(totales.km_por_litro, 2.25);
        assert_eq!(
            clasificar_eficiencia(totales.km_por_litro),
            NivelEficiencia::Regular
        );
    }

    #[test]
    fn test_eficiencia_por_ruta_ordena_y_recorta() {
        let mut viajes = vec![
            viaje("2026-01-05", "SLP - CDMX", 300.0, 100.0, None),
            viaje("2026-01-06", "SLP - CDMX", 300.0, 100.0, None),
            viaje("2026-01-07", "SLP - QRO", 100.0, 100.0, None),
            viaje("2026-01-08", "", 200.0, 100.0, None),
        ];
        viajes.push(viaje(
            "2026-01-09",
            "Una ruta con un nombre exageradamente largo",
            500.0,
            100.0,
            None,
        ));

        let rutas = eficiencia_por_ruta(&viajes);
        assert_eq!(rutas.len(), 4);
        assert_eq!(rutas[0].ruta, "Una ruta con un nomb...");
        assert_eq!(rutas[0].eficiencia, 5.0);
        assert_eq!(rutas[1].ruta, "SLP - CDMX");
        assert_eq!(rutas[1].viajes, 2);
        assert!(rutas.iter().any(|r| r.ruta == "Sin ruta"));
        assert_eq!(rutas[3].eficiencia, 1.0);
    }

    #[test]
    fn test_tendencia_consumo_invierte_orden() {
        // Colección ordenada por fecha descendente, como la entrega el repo
        let viajes = vec![
            viaje("2026-01-03", "SLP - CDMX", 300.0, 100.0, None),
            viaje("2026-01-02", "SLP - QRO", 200.0, 80.0, None),
            viaje("2026-01-01", "SLP - GDL", 100.0, 50.0, None),
        ];
        let puntos = tendencia_consumo(&viajes);
        assert_eq!(puntos.len(), 3);
        assert_eq!(puntos[0].fecha, "01/01");
        assert_eq!(puntos[2].fecha, "03/01");
        assert_eq!(puntos[2].litros, 100.0);
    }

    #[test]
    fn test_tendencia_consumo_limita_a_diez() {
        let viajes: Vec<Viaje> = (1..=15)
            .map(|d| viaje(&format!("2026-01-{:02}", d), "SLP - CDMX", 100.0, 50.0, None))
            .collect();
        let puntos = tendencia_consumo(&viajes);
        assert_eq!(puntos.len(), 10);
    }
}
