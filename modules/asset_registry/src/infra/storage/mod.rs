//! SeaORM-backed persistence

pub mod entity;
pub mod mapper;
pub mod migrations;
pub mod repositories;

pub use migrations::Migrator;
pub use repositories::{SeaOrmPremiseRepository, SeaOrmVehicleRepository};
