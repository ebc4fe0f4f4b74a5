//! HTTP request handlers - thin layer that delegates to domain service

use super::{
    dto::*,
    error::{map_domain_error, Problem},
};
use crate::domain::RegistryService;
use axum::{extract::Path, http::StatusCode, Json};
use std::sync::Arc;
use tenant_context::TenantId;

// ===== Premise handlers =====

pub async fn create_premise(
    service: Arc<RegistryService>,
    tenant: TenantId,
    Json(req): Json<UpsertPremiseRequest>,
) -> Result<(StatusCode, Json<PremiseDto>), Problem> {
    let premise = service
        .create_premise(tenant.as_uuid(), req.into())
        .await
        .map_err(map_domain_error)?;
    Ok((StatusCode::CREATED, Json(premise.into())))
}

pub async fn list_premises(
    service: Arc<RegistryService>,
    tenant: TenantId,
) -> Result<Json<PremisesListResponse>, Problem> {
    let items: Vec<PremiseSummaryDto> = service
        .list_premises(tenant.as_uuid())
        .await
        .map_err(map_domain_error)?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = items.len();
    Ok(Json(PremisesListResponse { items, total }))
}

pub async fn get_premise(
    service: Arc<RegistryService>,
    tenant: TenantId,
    Path(premise_id): Path<i64>,
) -> Result<Json<PremiseDto>, Problem> {
    let premise = service
        .get_premise(tenant.as_uuid(), premise_id)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(premise.into()))
}

pub async fn update_premise(
    service: Arc<RegistryService>,
    tenant: TenantId,
    Path(premise_id): Path<i64>,
    Json(req): Json<UpsertPremiseRequest>,
) -> Result<Json<PremiseDto>, Problem> {
    let premise = service
        .update_premise(tenant.as_uuid(), premise_id, req.into())
        .await
        .map_err(map_domain_error)?;
    Ok(Json(premise.into()))
}

pub async fn delete_premise(
    service: Arc<RegistryService>,
    tenant: TenantId,
    Path(premise_id): Path<i64>,
) -> Result<StatusCode, Problem> {
    service
        .delete_premise(tenant.as_uuid(), premise_id)
        .await
        .map_err(map_domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}

// ===== Vehicle handlers =====

pub async fn create_vehicle(
    service: Arc<RegistryService>,
    tenant: TenantId,
    Json(req): Json<UpsertVehicleRequest>,
) -> Result<(StatusCode, Json<VehicleDto>), Problem> {
    let vehicle = service
        .create_vehicle(tenant.as_uuid(), req.into())
        .await
        .map_err(map_domain_error)?;
    Ok((StatusCode::CREATED, Json(vehicle.into())))
}

pub async fn list_vehicles(
    service: Arc<RegistryService>,
    tenant: TenantId,
) -> Result<Json<VehiclesListResponse>, Problem> {
    let items: Vec<VehicleSummaryDto> = service
        .list_vehicles(tenant.as_uuid())
        .await
        .map_err(map_domain_error)?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = items.len();
    Ok(Json(VehiclesListResponse { items, total }))
}

pub async fn get_vehicle(
    service: Arc<RegistryService>,
    tenant: TenantId,
    Path(vehicle_id): Path<i64>,
) -> Result<Json<VehicleDto>, Problem> {
    let vehicle = service
        .get_vehicle(tenant.as_uuid(), vehicle_id)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(vehicle.into()))
}

pub async fn update_vehicle(
    service: Arc<RegistryService>,
    tenant: TenantId,
    Path(vehicle_id): Path<i64>,
    Json(req): Json<UpsertVehicleRequest>,
) -> Result<Json<VehicleDto>, Problem> {
    let vehicle = service
        .update_vehicle(tenant.as_uuid(), vehicle_id, req.into())
        .await
        .map_err(map_domain_error)?;
    Ok(Json(vehicle.into()))
}

pub async fn delete_vehicle(
    service: Arc<RegistryService>,
    tenant: TenantId,
    Path(vehicle_id): Path<i64>,
) -> Result<StatusCode, Problem> {
    service
        .delete_vehicle(tenant.as_uuid(), vehicle_id)
        .await
        .map_err(map_domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}
