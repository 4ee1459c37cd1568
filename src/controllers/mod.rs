//! Controladores
//!
//! Orquestan validación, cálculo de derivados, snapshots y la invalidación
//! del cache por colección tras cada escritura.

pub mod auth_controller;
pub mod driver_controller;
pub mod report_controller;
pub mod trip_controller;
pub mod truck_controller;
pub mod unit_controller;
