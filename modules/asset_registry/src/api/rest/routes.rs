//! Route registration for the asset registry API

use super::{dto::*, handlers};
use crate::domain::RegistryService;
use axum::{
    routing::{delete, get, post, put},
    Extension, Router,
};
use std::sync::Arc;
use tenant_context::TenantId;

/// Mount all asset registry routes onto `router`.
///
/// Every route reads the tenant from the `x-tenant-id` header.
pub fn register_routes(router: Router, service: Arc<RegistryService>) -> Router {
    router
        // Premise endpoints
        .route("/premises", post(create_premise_handler))
        .route("/premises", get(list_premises_handler))
        .route("/premises/{premise_id}", get(get_premise_handler))
        .route("/premises/{premise_id}", put(update_premise_handler))
        .route("/premises/{premise_id}", delete(delete_premise_handler))
        // Vehicle endpoints
        .route("/vehicles", post(create_vehicle_handler))
        .route("/vehicles", get(list_vehicles_handler))
        .route("/vehicles/{vehicle_id}", get(get_vehicle_handler))
        .route("/vehicles/{vehicle_id}", put(update_vehicle_handler))
        .route("/vehicles/{vehicle_id}", delete(delete_vehicle_handler))
        // Add service as extension for handlers
        .layer(Extension(service))
}

// ===== Handler wrappers that extract service from Extension =====

async fn create_premise_handler(
    Extension(service): Extension<Arc<RegistryService>>,
    tenant: TenantId,
    json: axum::Json<UpsertPremiseRequest>,
) -> Result<(axum::http::StatusCode, axum::Json<PremiseDto>), super::error::Problem> {
    handlers::create_premise(service, tenant, json).await
}

async fn list_premises_handler(
    Extension(service): Extension<Arc<RegistryService>>,
    tenant: TenantId,
) -> Result<axum::Json<PremisesListResponse>, super::error::Problem> {
    handlers::list_premises(service, tenant).await
}

async fn get_premise_handler(
    Extension(service): Extension<Arc<RegistryService>>,
    tenant: TenantId,
    path: axum::extract::Path<i64>,
) -> Result<axum::Json<PremiseDto>, super::error::Problem> {
    handlers::get_premise(service, tenant, path).await
}

async fn update_premise_handler(
    Extension(service): Extension<Arc<RegistryService>>,
    tenant: TenantId,
    path: axum::extract::Path<i64>,
    json: axum::Json<UpsertPremiseRequest>,
) -> Result<axum::Json<PremiseDto>, super::error::Problem> {
    handlers::update_premise(service, tenant, path, json).await
}

async fn delete_premise_handler(
    Extension(service): Extension<Arc<RegistryService>>,
    tenant: TenantId,
    path: axum::extract::Path<i64>,
) -> Result<axum::http::StatusCode, super::error::Problem> {
    handlers::delete_premise(service, tenant, path).await
}

async fn create_vehicle_handler(
    Extension(service): Extension<Arc<RegistryService>>,
    tenant: TenantId,
    json: axum::Json<UpsertVehicleRequest>,
) -> Result<(axum::http::StatusCode, axum::Json<VehicleDto>), super::error::Problem> {
    handlers::create_vehicle(service, tenant, json).await
}

async fn list_vehicles_handler(
    Extension(service): Extension<Arc<RegistryService>>,
    tenant: TenantId,
) -> Result<axum::Json<VehiclesListResponse>, super::error::Problem> {
    handlers::list_vehicles(service, tenant).await
}

async fn get_vehicle_handler(
    Extension(service): Extension<Arc<RegistryService>>,
    tenant: TenantId,
    path: axum::extract::Path<i64>,
) -> Result<axum::Json<VehicleDto>, super::error::Problem> {
    handlers::get_vehicle(service, tenant, path).await
}

async fn update_vehicle_handler(
    Extension(service): Extension<Arc<RegistryService>>,
    tenant: TenantId,
    path: axum::extract::Path<i64>,
    json: axum::Json<UpsertVehicleRequest>,
) -> Result<axum::Json<VehicleDto>, super::error::Problem> {
    handlers::update_vehicle(service, tenant, path, json).await
}

async fn delete_vehicle_handler(
    Extension(service): Extension<Arc<RegistryService>>,
    tenant: TenantId,
    path: axum::extract::Path<i64>,
) -> Result<axum::http::StatusCode, super::error::Problem> {
    handlers::delete_vehicle(service, tenant, path).await
}
