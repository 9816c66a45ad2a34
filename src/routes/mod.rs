pub mod health_routes;
pub mod vehicle_routes;
