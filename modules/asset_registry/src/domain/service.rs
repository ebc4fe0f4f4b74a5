//! Domain service for the asset registry
//!
//! Premise and vehicle records share the same shape of lifecycle: a
//! fixed core row plus a dynamic attribute set that is replaced
//! wholesale on every update. Repositories return `anyhow::Result`;
//! this layer recovers typed [`RegistryError`]s from those errors and
//! turns everything else into `RegistryError::Internal` after logging.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::config::Config;
use crate::contract::model::{
    Premise, PremiseDraft, PremiseSummary, Vehicle, VehicleDraft, VehicleSummary,
};
use crate::contract::RegistryError;
use crate::domain::attributes::{strip_core_keys, PREMISE_CORE_KEYS, VEHICLE_CORE_KEYS};
use crate::domain::repository::{PremiseRepository, VehicleRepository};

pub struct RegistryService {
    premises: Arc<dyn PremiseRepository>,
    vehicles: Arc<dyn VehicleRepository>,
    config: Config,
}

impl RegistryService {
    pub fn new(
        premises: Arc<dyn PremiseRepository>,
        vehicles: Arc<dyn VehicleRepository>,
        config: Config,
    ) -> Self {
        Self {
            premises,
            vehicles,
            config,
        }
    }

    // ===== Premises =====

    pub async fn create_premise(
        &self,
        tenant: Uuid,
        draft: PremiseDraft,
    ) -> Result<Premise, RegistryError> {
        let name = require_text(&draft.name, "premise name")?;
        let attributes = self.accept_attributes(draft.attributes, PREMISE_CORE_KEYS)?;

        let premise = Premise {
            id: 0,
            tenant_id: tenant,
            name,
            address: trimmed(draft.address),
            country_id: draft.country_id,
            area_id: draft.area_id,
            status_id: draft.status_id,
            created_at: Utc::now(),
            attributes,
        };
        let created = self
            .premises
            .create(&premise)
            .await
            .map_err(storage_error)?;
        tracing::info!(tenant = %tenant, premise_id = created.id, "premise created");
        Ok(created)
    }

    pub async fn get_premise(
        &self,
        tenant: Uuid,
        premise_id: i64,
    ) -> Result<Premise, RegistryError> {
        let mut premise = self.require_premise(tenant, premise_id).await?;
        premise.attributes = strip_core_keys(premise.attributes, PREMISE_CORE_KEYS);
        Ok(premise)
    }

    pub async fn list_premises(&self, tenant: Uuid) -> Result<Vec<PremiseSummary>, RegistryError> {
        self.premises.list(tenant).await.map_err(storage_error)
    }

    /// Full replace: core columns are overwritten and the stored
    /// attribute set becomes exactly the submitted one, so omitted keys
    /// are dropped.
    pub async fn update_premise(
        &self,
        tenant: Uuid,
        premise_id: i64,
        draft: PremiseDraft,
    ) -> Result<Premise, RegistryError> {
        let existing = self.require_premise(tenant, premise_id).await?;
        let name = require_text(&draft.name, "premise name")?;
        let attributes = self.accept_attributes(draft.attributes, PREMISE_CORE_KEYS)?;

        let premise = Premise {
            id: existing.id,
            tenant_id: tenant,
            name,
            address: trimmed(draft.address),
            country_id: draft.country_id,
            area_id: draft.area_id,
            status_id: draft.status_id,
            created_at: existing.created_at,
            attributes,
        };
        self.premises
            .update(&premise)
            .await
            .map_err(storage_error)
    }

    pub async fn delete_premise(
        &self,
        tenant: Uuid,
        premise_id: i64,
    ) -> Result<(), RegistryError> {
        self.require_premise(tenant, premise_id).await?;
        self.premises
            .delete(tenant, premise_id)
            .await
            .map_err(storage_error)?;
        tracing::info!(tenant = %tenant, premise_id, "premise deleted");
        Ok(())
    }

    // ===== Vehicles =====

    pub async fn create_vehicle(
        &self,
        tenant: Uuid,
        draft: VehicleDraft,
    ) -> Result<Vehicle, RegistryError> {
        let registration_no = require_text(&draft.registration_no, "registration number")?;
        let attributes = self.accept_attributes(draft.attributes, VEHICLE_CORE_KEYS)?;

        let vehicle = Vehicle {
            id: 0,
            tenant_id: tenant,
            registration_no,
            label: trimmed(draft.label),
            country_id: draft.country_id,
            area_id: draft.area_id,
            status_id: draft.status_id,
            created_at: Utc::now(),
            attributes,
        };
        let created = self
            .vehicles
            .create(&vehicle)
            .await
            .map_err(storage_error)?;
        tracing::info!(tenant = %tenant, vehicle_id = created.id, "vehicle created");
        Ok(created)
    }

    pub async fn get_vehicle(
        &self,
        tenant: Uuid,
        vehicle_id: i64,
    ) -> Result<Vehicle, RegistryError> {
        let mut vehicle = self.require_vehicle(tenant, vehicle_id).await?;
        vehicle.attributes = strip_core_keys(vehicle.attributes, VEHICLE_CORE_KEYS);
        Ok(vehicle)
    }

    pub async fn list_vehicles(&self, tenant: Uuid) -> Result<Vec<VehicleSummary>, RegistryError> {
        self.vehicles.list(tenant).await.map_err(storage_error)
    }

    pub async fn update_vehicle(
        &self,
        tenant: Uuid,
        vehicle_id: i64,
        draft: VehicleDraft,
    ) -> Result<Vehicle, RegistryError> {
        let existing = self.require_vehicle(tenant, vehicle_id).await?;
        let registration_no = require_text(&draft.registration_no, "registration number")?;
        let attributes = self.accept_attributes(draft.attributes, VEHICLE_CORE_KEYS)?;

        let vehicle = Vehicle {
            id: existing.id,
            tenant_id: tenant,
            registration_no,
            label: trimmed(draft.label),
            country_id: draft.country_id,
            area_id: draft.area_id,
            status_id: draft.status_id,
            created_at: existing.created_at,
            attributes,
        };
        self.vehicles
            .update(&vehicle)
            .await
            .map_err(storage_error)
    }

    pub async fn delete_vehicle(
        &self,
        tenant: Uuid,
        vehicle_id: i64,
    ) -> Result<(), RegistryError> {
        self.require_vehicle(tenant, vehicle_id).await?;
        self.vehicles
            .delete(tenant, vehicle_id)
            .await
            .map_err(storage_error)?;
        tracing::info!(tenant = %tenant, vehicle_id, "vehicle deleted");
        Ok(())
    }

    // ===== Shared validation =====

    async fn require_premise(
        &self,
        tenant: Uuid,
        premise_id: i64,
    ) -> Result<Premise, RegistryError> {
        self.premises
            .find(tenant, premise_id)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| not_found("premise", premise_id))
    }

    async fn require_vehicle(
        &self,
        tenant: Uuid,
        vehicle_id: i64,
    ) -> Result<Vehicle, RegistryError> {
        self.vehicles
            .find(tenant, vehicle_id)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| not_found("vehicle", vehicle_id))
    }

    /// Core-named keys are dropped rather than rejected; the count cap
    /// applies to what would actually be stored.
    fn accept_attributes(
        &self,
        attributes: BTreeMap<String, String>,
        core_keys: &[&str],
    ) -> Result<BTreeMap<String, String>, RegistryError> {
        let attributes = strip_core_keys(attributes, core_keys);
        if attributes.len() > self.config.max_attributes {
            return Err(RegistryError::Validation {
                message: format!(
                    "too many attributes: {} exceeds the limit of {}",
                    attributes.len(),
                    self.config.max_attributes
                ),
            });
        }
        Ok(attributes)
    }
}

fn require_text(value: &str, what: &str) -> Result<String, RegistryError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RegistryError::Validation {
            message: format!("{} cannot be empty", what),
        });
    }
    Ok(trimmed.to_string())
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn not_found(resource: &str, id: i64) -> RegistryError {
    RegistryError::NotFound {
        resource: resource.to_string(),
        id: id.to_string(),
    }
}

/// Recover a typed error smuggled through `anyhow`, or log and degrade to
/// an internal error.
fn storage_error(err: anyhow::Error) -> RegistryError {
    match err.downcast::<RegistryError>() {
        Ok(typed) => typed,
        Err(err) => {
            tracing::error!(error = ?err, "storage operation failed");
            RegistryError::Internal
        }
    }
}
