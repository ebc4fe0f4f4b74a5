//! Contract layer - public API of the asset registry
//!
//! This layer contains transport-agnostic models and errors.
//! NO serde derives on models - these are pure domain types.

pub mod error;
pub mod model;

pub use error::RegistryError;
pub use model::{
    Premise, PremiseDraft, PremiseSummary, Vehicle, VehicleDraft, VehicleSummary,
};
