pub mod auth_routes;
pub mod contact_routes;
pub mod driver_routes;
pub mod report_routes;
pub mod trip_routes;
pub mod truck_routes;
pub mod unit_routes;
