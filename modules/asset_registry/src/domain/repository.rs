//! Repository ports for the asset registry
//!
//! Implementations live in `infra::storage`. All methods return
//! `anyhow::Result`; failures a caller can act on (the vehicle
//! registration unique index) are surfaced as a typed
//! [`RegistryError`](crate::contract::RegistryError) inside the `anyhow`
//! error and recovered by the service via downcast.

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::contract::model::{Premise, PremiseSummary, Vehicle, VehicleSummary};

/// Persistence for premises and their attribute rows.
#[async_trait]
pub trait PremiseRepository: Send + Sync {
    /// Insert the core row and its attributes in one transaction
    async fn create(&self, premise: &Premise) -> Result<Premise>;

    /// Update the core row and replace the attribute set wholesale
    async fn update(&self, premise: &Premise) -> Result<Premise>;

    /// Fetch the core row with its attributes merged in
    async fn find(&self, tenant: Uuid, premise_id: i64) -> Result<Option<Premise>>;

    /// Core-column summaries for a tenant, newest first
    async fn list(&self, tenant: Uuid) -> Result<Vec<PremiseSummary>>;

    /// Delete the core row and its attributes in one transaction
    async fn delete(&self, tenant: Uuid, premise_id: i64) -> Result<()>;
}

/// Persistence for vehicles and their attribute rows.
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Insert the core row and its attributes in one transaction.
    ///
    /// A duplicate registration number for the tenant surfaces as
    /// `RegistryError::Conflict` inside the returned error.
    async fn create(&self, vehicle: &Vehicle) -> Result<Vehicle>;

    /// Update the core row and replace the attribute set wholesale
    async fn update(&self, vehicle: &Vehicle) -> Result<Vehicle>;

    /// Fetch the core row with its attributes merged in
    async fn find(&self, tenant: Uuid, vehicle_id: i64) -> Result<Option<Vehicle>>;

    /// Core-column summaries for a tenant, newest first
    async fn list(&self, tenant: Uuid) -> Result<Vec<VehicleSummary>>;

    /// Delete the core row and its attributes in one transaction
    async fn delete(&self, tenant: Uuid, vehicle_id: i64) -> Result<()>;
}
