//! Mapper implementations for converting between DTOs and contract models

use super::dto::*;
use crate::contract::model::{
    Premise, PremiseDraft, PremiseSummary, Vehicle, VehicleDraft, VehicleSummary,
};
use crate::domain::attributes::{sweep, PREMISE_CORE_KEYS, VEHICLE_CORE_KEYS};

// ===== Premise conversions =====

impl From<Premise> for PremiseDto {
    fn from(premise: Premise) -> Self {
        Self {
            id: premise.id,
            name: premise.name,
            address: premise.address,
            country_id: premise.country_id,
            area_id: premise.area_id,
            status_id: premise.status_id,
            created_at: premise.created_at,
            attributes: premise.attributes,
        }
    }
}

impl From<PremiseSummary> for PremiseSummaryDto {
    fn from(summary: PremiseSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            address: summary.address,
            country_id: summary.country_id,
            area_id: summary.area_id,
            status_id: summary.status_id,
            created_at: summary.created_at,
        }
    }
}

impl From<UpsertPremiseRequest> for PremiseDraft {
    fn from(req: UpsertPremiseRequest) -> Self {
        Self {
            name: req.name,
            address: req.address,
            country_id: req.country_id,
            area_id: req.area_id,
            status_id: req.status_id,
            attributes: sweep(&req.extra, PREMISE_CORE_KEYS),
        }
    }
}

// ===== Vehicle conversions =====

impl From<Vehicle> for VehicleDto {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            registration_no: vehicle.registration_no,
            label: vehicle.label,
            country_id: vehicle.country_id,
            area_id: vehicle.area_id,
            status_id: vehicle.status_id,
            created_at: vehicle.created_at,
            attributes: vehicle.attributes,
        }
    }
}

impl From<VehicleSummary> for VehicleSummaryDto {
    fn from(summary: VehicleSummary) -> Self {
        Self {
            id: summary.id,
            registration_no: summary.registration_no,
            label: summary.label,
            country_id: summary.country_id,
            area_id: summary.area_id,
            status_id: summary.status_id,
            created_at: summary.created_at,
        }
    }
}

impl From<UpsertVehicleRequest> for VehicleDraft {
    fn from(req: UpsertVehicleRequest) -> Self {
        Self {
            registration_no: req.registration_no,
            label: req.label,
            country_id: req.country_id,
            area_id: req.area_id,
            status_id: req.status_id,
            attributes: sweep(&req.extra, VEHICLE_CORE_KEYS),
        }
    }
}
