//! Domain layer for the asset registry

pub mod attributes;
pub mod repository;
pub mod service;

pub use repository::{PremiseRepository, VehicleRepository};
pub use service::RegistryService;
