//! CARSON - Sistema de gestión de inventario de carros en reparación
//!
//! API REST sobre un almacén de carros: CRUD con placa única y
//! estadísticas de costos de reparación.

pub mod app;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod utils;

pub use app::build_app;
