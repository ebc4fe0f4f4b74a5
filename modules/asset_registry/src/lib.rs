//! Asset Registry
//!
//! Tenant-scoped records for premises and vehicles. Each record carries a
//! small set of typed columns plus an open key/value attribute bag, so
//! tenants can persist whatever extra fields their module configuration
//! defines without schema changes. Attribute writes are full-replace: the
//! set sent on an update is the set that remains.

// Public exports
pub mod contract;
pub use contract::{
    Premise, PremiseDraft, PremiseSummary, RegistryError, Vehicle, VehicleDraft, VehicleSummary,
};

pub mod module;
pub use module::AssetRegistryModule;

pub use config::Config;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
