//! Filtrado de viajes
//!
//! `ViajeFilters` es un valor inmutable que se aplica como predicado sobre la
//! colección completa de viajes en memoria. El filtro por semana ISO y el
//! rango manual de fechas son mutuamente excluyentes: los constructores
//! mantienen esa invariante, de modo que nunca conviven ambos modos en un
//! mismo valor.

use chrono::{Datelike, Local, NaiveDate};
use uuid::Uuid;

use crate::models::trip::Viaje;

/// Modo de filtrado por período (año en curso)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PeriodoFiltro {
    #[default]
    Todos,
    Personalizado,
    Semana(u32),
}

impl PeriodoFiltro {
    /// Parsear el valor del query string: `todos`, `personalizado` o `semana-N`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "todos" => Some(PeriodoFiltro::Todos),
            "personalizado" => Some(PeriodoFiltro::Personalizado),
            _ => {
                let numero = value.strip_prefix("semana-")?;
                let semana: u32 = numero.parse().ok()?;
                if (1..=53).contains(&semana) {
                    Some(PeriodoFiltro::Semana(semana))
                } else {
                    None
                }
            }
        }
    }
}

/// Criterios de filtrado de viajes
#[derive(Debug, Clone, Default)]
pub struct ViajeFilters {
    fecha_inicio: Option<NaiveDate>,
    fecha_fin: Option<NaiveDate>,
    conductor_id: Option<Uuid>,
    camion_id: Option<Uuid>,
    ruta: Option<String>,
    periodo: PeriodoFiltro,
}

impl ViajeFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seleccionar un período. Elegir una semana borra el rango manual de
    /// fechas.
    pub fn con_periodo(mut self, periodo: PeriodoFiltro) -> Self {
        if matches!(periodo, PeriodoFiltro::Semana(_)) {
            self.fecha_inicio = None;
            self.fecha_fin = None;
        }
        self.periodo = periodo;
        self
    }

    /// Fijar la fecha inicial del rango manual; el período pasa a
    /// personalizado.
    pub fn con_fecha_inicio(mut self, fecha: NaiveDate) -> Self {
        self.fecha_inicio = Some(fecha);
        self.periodo = PeriodoFiltro::Personalizado;
        self
    }

    /// Fijar la fecha final del rango manual; el período pasa a personalizado.
    pub fn con_fecha_fin(mut self, fecha: NaiveDate) -> Self {
        self.fecha_fin = Some(fecha);
        self.periodo = PeriodoFiltro::Personalizado;
        self
    }

    /// Filtrar por conductor específico
    pub fn con_conductor(mut self, conductor_id: Uuid) -> Self {
        self.salir_de_semana();
        self.conductor_id = Some(conductor_id);
        self
    }

    /// Filtrar por camión específico
    pub fn con_camion(mut self, camion_id: Uuid) -> Self {
        self.salir_de_semana();
        self.camion_id = Some(camion_id);
        self
    }

    /// Buscar por subcadena en la ruta de ida (sin distinguir mayúsculas)
    pub fn con_ruta(mut self, ruta: impl Into<String>) -> Self {
        self.salir_de_semana();
        self.ruta = Some(ruta.into());
        self
    }

    fn salir_de_semana(&mut self) {
        if matches!(self.periodo, PeriodoFiltro::Semana(_)) {
            self.periodo = PeriodoFiltro::Personalizado;
        }
    }

    pub fn periodo(&self) -> PeriodoFiltro {
        self.periodo
    }

    /// ¿El viaje cumple todos los criterios? La semana se evalúa contra el
    /// año calendario de hoy.
    pub fn matches(&self, viaje: &Viaje) -> bool {
        self.matches_on(viaje, Local::now().date_naive())
    }

    /// Variante pura con fecha de referencia explícita
    pub fn matches_on(&self, viaje: &Viaje, hoy: NaiveDate) -> bool {
        match self.periodo {
            PeriodoFiltro::Semana(semana) => {
                // Solo viajes del año calendario en curso, aunque el número
                // de semana coincida en otro año. El rango manual se ignora.
                if viaje.fecha.year() != hoy.year() || viaje.fecha.iso_week().week() != semana {
                    return false;
                }
            }
            PeriodoFiltro::Todos | PeriodoFiltro::Personalizado => {
                if let Some(inicio) = self.fecha_inicio {
                    if viaje.fecha < inicio {
                        return false;
                    }
                }
                if let Some(fin) = self.fecha_fin {
                    if viaje.fecha > fin {
                        return false;
                    }
                }
            }
        }

        if let Some(conductor_id) = self.conductor_id {
            // Un viaje sin conductor nunca coincide con un filtro específico
            if viaje.conductor_id != Some(conductor_id) {
                return false;
            }
        }

        if let Some(camion_id) = self.camion_id {
            if viaje.camion_id != Some(camion_id) {
                return false;
            }
        }

        if let Some(ruta) = &self.ruta {
            let consulta = ruta.trim().to_lowercase();
            if !consulta.is_empty()
                && !viaje.ruta_ida.to_lowercase().contains(&consulta)
            {
                return false;
            }
        }

        true
    }

    /// Reducir la colección completa al subconjunto visible
    pub fn aplicar(&self, viajes: Vec<Viaje>) -> Vec<Viaje> {
        let hoy = Local::now().date_naive();
        viajes
            .into_iter()
            .filter(|v| self.matches_on(v, hoy))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sqlx::types::Json;

    fn viaje(fecha: &str, ruta: &str, conductor: Option<Uuid>, camion: Option<Uuid>) -> Viaje {
        Viaje {
            id: Uuid::new_v4(),
            fecha: NaiveDate::parse_from_str(fecha, "%Y-%m-%d").unwrap(),
            conductor_id: conductor,
            conductor_nombre: None,
            camion_id: camion,
            camion_nombre: None,
            camion_placas: None,
            ruta_ida: ruta.to_string(),
            kilometros_ida: 100.0,
            rutas_adicionales: Json(vec![]),
            ruta_regreso: None,
            kilometros_regreso: None,
            kilometros_total: 100.0,
            litros_combustible: 50.0,
            km_por_litro: 2.0,
            costo_combustible: None,
            notas: None,
            created_at: Utc::now(),
        }
    }

    fn hoy() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 5).unwrap()
    }

    #[test]
    fn test_filtro_identidad_acepta_todo() {
        let filtros = ViajeFilters::new();
        let v = viaje("2024-11-30", "SLP - CDMX", None, None);
        assert!(filtros.matches_on(&v, hoy()));
    }

    #[test]
    fn test_rango_de_fechas_inclusivo() {
        let filtros = ViajeFilters::new()
            .con_fecha_inicio(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap())
            .con_fecha_fin(NaiveDate::from_ymd_opt(2026, 3, 31).unwrap());

        assert!(filtros.matches_on(&viaje("2026-03-01", "SLP", None, None), hoy()));
        assert!(filtros.matches_on(&viaje("2026-03-31", "SLP", None, None), hoy()));
        assert!(!filtros.matches_on(&viaje("2026-02-28", "SLP", None, None), hoy()));
        assert!(!filtros.matches_on(&viaje("2026-04-01", "SLP", None, None), hoy()));
    }

    #[test]
    fn test_semana_del_anio_en_curso() {
        // 2026-01-26 cae en la semana ISO 5 de 2026
        let filtros = ViajeFilters::new().con_periodo(PeriodoFiltro::Semana(5));
        assert!(filtros.matches_on(&viaje("2026-01-26", "SLP", None, None), hoy()));
        assert!(!filtros.matches_on(&viaje("2026-02-10", "SLP", None, None), hoy()));
    }

    #[test]
    fn test_semana_de_otro_anio_no_coincide() {
        // 2025-01-27 es semana 5 de 2025; con referencia en 2026 no coincide
        let filtros = ViajeFilters::new().con_periodo(PeriodoFiltro::Semana(5));
        assert!(!filtros.matches_on(&viaje("2025-01-27", "SLP", None, None), hoy()));
    }

    #[test]
    fn test_semana_ignora_rango_manual() {
        let filtros = ViajeFilters::new()
            .con_fecha_inicio(NaiveDate::from_ymd_opt(2026, 6, 1).unwrap())
            .con_periodo(PeriodoFiltro::Semana(5));
        // La semana borró el rango manual: un viaje de enero en semana 5 pasa
        assert!(filtros.matches_on(&viaje("2026-01-26", "SLP", None, None), hoy()));
    }

    #[test]
    fn test_fecha_manual_resetea_periodo() {
        let filtros = ViajeFilters::new()
            .con_periodo(PeriodoFiltro::Semana(5))
            .con_fecha_inicio(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
        assert_eq!(filtros.periodo(), PeriodoFiltro::Personalizado);
        // Vuelve a regir el rango manual, no la semana
        assert!(!filtros.matches_on(&viaje("2026-01-26", "SLP", None, None), hoy()));
        assert!(filtros.matches_on(&viaje("2026-02-10", "SLP", None, None), hoy()));
    }

    #[test]
    fn test_filtro_manual_sale_del_modo_semana() {
        let filtros = ViajeFilters::new()
            .con_periodo(PeriodoFiltro::Semana(5))
            .con_ruta("cdmx");
        assert_eq!(filtros.periodo(), PeriodoFiltro::Personalizado);

        let conductor = Uuid::new_v4();
        let filtros = ViajeFilters::new()
            .con_periodo(PeriodoFiltro::Semana(5))
            .con_conductor(conductor);
        assert_eq!(filtros.periodo(), PeriodoFiltro::Personalizado);
    }

    #[test]
    fn test_busqueda_de_ruta_sin_mayusculas() {
        let filtros = ViajeFilters::new().con_ruta("cdmx");
        assert!(filtros.matches_on(&viaje("2026-03-01", "SLP - CDMX", None, None), hoy()));
        assert!(!filtros.matches_on(&viaje("2026-03-01", "SLP - QRO", None, None), hoy()));
        // Ruta vacía se trata como cadena vacía, nunca truena
        assert!(!filtros.matches_on(&viaje("2026-03-01", "", None, None), hoy()));
    }

    #[test]
    fn test_conductor_ausente_no_coincide_con_filtro_especifico() {
        let conductor = Uuid::new_v4();
        let filtros = ViajeFilters::new().con_conductor(conductor);
        assert!(!filtros.matches_on(&viaje("2026-03-01", "SLP", None, None), hoy()));
        assert!(filtros.matches_on(&viaje("2026-03-01", "SLP", Some(conductor), None), hoy()));
        assert!(!filtros.matches_on(
            &viaje("2026-03-01", "SLP", Some(Uuid::new_v4()), None),
            hoy()
        ));
    }

    #[test]
    fn test_camion_ausente_no_coincide_con_filtro_especifico() {
        let camion = Uuid::new_v4();
        let filtros = ViajeFilters::new().con_camion(camion);
        assert!(!filtros.matches_on(&viaje("2026-03-01", "SLP", None, None), hoy()));
        assert!(filtros.matches_on(&viaje("2026-03-01", "SLP", None, Some(camion)), hoy()));
    }

    #[test]
    fn test_parse_periodo() {
        assert_eq!(PeriodoFiltro::parse("todos"), Some(PeriodoFiltro::Todos));
        assert_eq!(
            PeriodoFiltro::parse("personalizado"),
            Some(PeriodoFiltro::Personalizado)
        );
        assert_eq!(
            PeriodoFiltro::parse("semana-5"),
            Some(PeriodoFiltro::Semana(5))
        );
        assert_eq!(PeriodoFiltro::parse("semana-53"), Some(PeriodoFiltro::Semana(53)));
        assert_eq!(PeriodoFiltro::parse("semana-54"), None);
        assert_eq!(PeriodoFiltro::parse("semana-0"), None);
        assert_eq!(PeriodoFiltro::parse("mes-3"), None);
    }

    #[test]
    fn test_aplicar_reduce_la_coleccion() {
        let filtros = ViajeFilters::new().con_ruta("slp");
        let viajes = vec![
            viaje("2026-03-01", "SLP - CDMX", None, None),
            viaje("2026-03-02", "GDL - MTY", None, None),
        ];
        let visibles = filtros.aplicar(viajes);
        assert_eq!(visibles.len(), 1);
        assert_eq!(visibles[0].ruta_ida, "SLP - CDMX");
    }
}
