//! Services module
//!
//! Este módulo contiene la lógica de negocio y servicios de la aplicación.
//! El núcleo (métricas, filtros, reporte) son funciones puras sobre datos en
//! memoria; los servicios de JWT y notificaciones encapsulan integraciones.

pub mod filter_service;
pub mod jwt_service;
pub mod metrics_service;
pub mod notification_service;
pub mod report_service;
