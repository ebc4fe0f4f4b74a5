//! Conversions between SeaORM models and contract models

use std::collections::BTreeMap;

use sea_orm::ActiveValue::{NotSet, Set};
use uuid::Uuid;

use crate::contract::model::{Premise, PremiseSummary, Vehicle, VehicleSummary};

use super::entity::{premise, premise_attribute, vehicle, vehicle_attribute};

impl From<premise::Model> for PremiseSummary {
    fn from(m: premise::Model) -> Self {
        Self {
            id: m.id,
            tenant_id: m.tenant_id,
            name: m.name,
            address: m.address,
            country_id: m.country_id,
            area_id: m.area_id,
            status_id: m.status_id,
            created_at: m.created_at,
        }
    }
}

/// Assemble a premise from its core row and its attribute rows
pub fn premise_from_models(
    core: premise::Model,
    attributes: Vec<premise_attribute::Model>,
) -> Premise {
    Premise {
        id: core.id,
        tenant_id: core.tenant_id,
        name: core.name,
        address: core.address,
        country_id: core.country_id,
        area_id: core.area_id,
        status_id: core.status_id,
        created_at: core.created_at,
        attributes: attributes.into_iter().map(|a| (a.key, a.value)).collect(),
    }
}

/// `id == 0` marks a row that has not been assigned an id yet
pub fn premise_active_model(premise: &Premise) -> premise::ActiveModel {
    premise::ActiveModel {
        id: if premise.id == 0 {
            NotSet
        } else {
            Set(premise.id)
        },
        tenant_id: Set(premise.tenant_id),
        name: Set(premise.name.clone()),
        address: Set(premise.address.clone()),
        country_id: Set(premise.country_id),
        area_id: Set(premise.area_id),
        status_id: Set(premise.status_id),
        created_at: Set(premise.created_at),
    }
}

pub fn premise_attribute_models(
    premise_id: i64,
    tenant_id: Uuid,
    attributes: &BTreeMap<String, String>,
) -> Vec<premise_attribute::ActiveModel> {
    attributes
        .iter()
        .map(|(key, value)| premise_attribute::ActiveModel {
            premise_id: Set(premise_id),
            key: Set(key.clone()),
            tenant_id: Set(tenant_id),
            value: Set(value.clone()),
        })
        .collect()
}

impl From<vehicle::Model> for VehicleSummary {
    fn from(m: vehicle::Model) -> Self {
        Self {
            id: m.id,
            tenant_id: m.tenant_id,
            registration_no: m.registration_no,
            label: m.label,
            country_id: m.country_id,
            area_id: m.area_id,
            status_id: m.status_id,
            created_at: m.created_at,
        }
    }
}

/// Assemble a vehicle from its core row and its attribute rows
pub fn vehicle_from_models(
    core: vehicle::Model,
    attributes: Vec<vehicle_attribute::Model>,
) -> Vehicle {
    Vehicle {
        id: core.id,
        tenant_id: core.tenant_id,
        registration_no: core.registration_no,
        label: core.label,
        country_id: core.country_id,
        area_id: core.area_id,
        status_id: core.status_id,
        created_at: core.created_at,
        attributes: attributes.into_iter().map(|a| (a.key, a.value)).collect(),
    }
}

pub fn vehicle_active_model(vehicle: &Vehicle) -> vehicle::ActiveModel {
    vehicle::ActiveModel {
        id: if vehicle.id == 0 {
            NotSet
        } else {
            Set(vehicle.id)
        },
        tenant_id: Set(vehicle.tenant_id),
        registration_no: Set(vehicle.registration_no.clone()),
        label: Set(vehicle.label.clone()),
        country_id: Set(vehicle.country_id),
        area_id: Set(vehicle.area_id),
        status_id: Set(vehicle.status_id),
        created_at: Set(vehicle.created_at),
    }
}

pub fn vehicle_attribute_models(
    vehicle_id: i64,
    tenant_id: Uuid,
    attributes: &BTreeMap<String, String>,
) -> Vec<vehicle_attribute::ActiveModel> {
    attributes
        .iter()
        .map(|(key, value)| vehicle_attribute::ActiveModel {
            vehicle_id: Set(vehicle_id),
            key: Set(key.clone()),
            tenant_id: Set(tenant_id),
            value: Set(value.clone()),
        })
        .collect()
}
