//! Repositorios de acceso a datos
//!
//! Un repositorio por tabla, con queries explícitas de sqlx.

pub mod driver_repository;
pub mod trip_repository;
pub mod truck_repository;
pub mod unit_repository;
pub mod user_repository;
