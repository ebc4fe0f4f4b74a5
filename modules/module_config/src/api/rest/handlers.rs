//! HTTP request handlers - thin layer that delegates to domain service

use super::{
    dto::*,
    error::{map_domain_error, Problem},
};
use crate::contract::model::{FieldDraft, ScopeContext};
use crate::domain::ConfigService;
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tenant_context::TenantId;

// ===== Catalog handlers =====

pub async fn list_modules(
    service: Arc<ConfigService>,
) -> Result<Json<ModulesListResponse>, Problem> {
    let items: Vec<ModuleDto> = service
        .list_modules()
        .await
        .map_err(map_domain_error)?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = items.len();
    Ok(Json(ModulesListResponse { items, total }))
}

pub async fn get_scope_catalog(
    service: Arc<ConfigService>,
) -> Result<Json<ScopeCatalogDto>, Problem> {
    let catalog = service.scope_catalog().await.map_err(map_domain_error)?;
    Ok(Json(catalog.into()))
}

pub async fn list_statuses(
    service: Arc<ConfigService>,
) -> Result<Json<StatusesListResponse>, Problem> {
    let items: Vec<StatusDto> = service
        .list_statuses()
        .await
        .map_err(map_domain_error)?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = items.len();
    Ok(Json(StatusesListResponse { items, total }))
}

// ===== Section handlers =====

/// Query parameters for listing sections
#[derive(Debug, Deserialize)]
pub struct ListSectionsQuery {
    pub module_id: i64,
}

pub async fn create_section(
    service: Arc<ConfigService>,
    tenant: TenantId,
    Json(req): Json<CreateSectionRequest>,
) -> Result<(StatusCode, Json<SectionDto>), Problem> {
    let section = service
        .create_section(tenant.as_uuid(), req.into())
        .await
        .map_err(map_domain_error)?;
    Ok((StatusCode::CREATED, Json(section.into())))
}

pub async fn list_sections(
    service: Arc<ConfigService>,
    tenant: TenantId,
    Query(query): Query<ListSectionsQuery>,
) -> Result<Json<SectionsListResponse>, Problem> {
    let items: Vec<SectionDto> = service
        .list_sections(tenant.as_uuid(), query.module_id)
        .await
        .map_err(map_domain_error)?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = items.len();
    Ok(Json(SectionsListResponse { items, total }))
}

pub async fn update_section(
    service: Arc<ConfigService>,
    tenant: TenantId,
    Path(section_id): Path<i64>,
    Json(req): Json<UpdateSectionRequest>,
) -> Result<Json<SectionDto>, Problem> {
    let section = service
        .update_section(tenant.as_uuid(), section_id, req.name, req.sort_order)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(section.into()))
}

pub async fn delete_section(
    service: Arc<ConfigService>,
    tenant: TenantId,
    Path(section_id): Path<i64>,
) -> Result<StatusCode, Problem> {
    service
        .delete_section(tenant.as_uuid(), section_id)
        .await
        .map_err(map_domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}

// ===== Field handlers =====

/// Query parameters for listing fields
#[derive(Debug, Deserialize)]
pub struct ListFieldsQuery {
    pub section_id: i64,
}

pub async fn create_field(
    service: Arc<ConfigService>,
    tenant: TenantId,
    Json(req): Json<UpsertFieldRequest>,
) -> Result<(StatusCode, Json<FieldDto>), Problem> {
    let draft = FieldDraft::try_from(req).map_err(map_domain_error)?;
    let field = service
        .create_field(tenant.as_uuid(), draft)
        .await
        .map_err(map_domain_error)?;
    Ok((StatusCode::CREATED, Json(field.into())))
}

pub async fn create_fields(
    service: Arc<ConfigService>,
    tenant: TenantId,
    Json(req): Json<CreateFieldsRequest>,
) -> Result<(StatusCode, Json<FieldsListResponse>), Problem> {
    let drafts = req
        .fields
        .into_iter()
        .map(FieldDraft::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(map_domain_error)?;
    let items: Vec<FieldDto> = service
        .create_fields(tenant.as_uuid(), drafts)
        .await
        .map_err(map_domain_error)?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = items.len();
    Ok((StatusCode::CREATED, Json(FieldsListResponse { items, total })))
}

pub async fn get_field(
    service: Arc<ConfigService>,
    tenant: TenantId,
    Path(field_id): Path<i64>,
) -> Result<Json<FieldDto>, Problem> {
    let field = service
        .get_field(tenant.as_uuid(), field_id)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(field.into()))
}

pub async fn list_fields(
    service: Arc<ConfigService>,
    tenant: TenantId,
    Query(query): Query<ListFieldsQuery>,
) -> Result<Json<FieldsListResponse>, Problem> {
    let items: Vec<FieldDto> = service
        .list_fields(tenant.as_uuid(), query.section_id)
        .await
        .map_err(map_domain_error)?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = items.len();
    Ok(Json(FieldsListResponse { items, total }))
}

pub async fn update_field(
    service: Arc<ConfigService>,
    tenant: TenantId,
    Path(field_id): Path<i64>,
    Json(req): Json<UpsertFieldRequest>,
) -> Result<Json<FieldDto>, Problem> {
    let draft = FieldDraft::try_from(req).map_err(map_domain_error)?;
    let field = service
        .update_field(tenant.as_uuid(), field_id, draft)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(field.into()))
}

pub async fn delete_field(
    service: Arc<ConfigService>,
    tenant: TenantId,
    Path(field_id): Path<i64>,
) -> Result<StatusCode, Problem> {
    service
        .delete_field(tenant.as_uuid(), field_id)
        .await
        .map_err(map_domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}

// ===== Activation handlers =====

/// Query parameters for listing activations
#[derive(Debug, Deserialize)]
pub struct ListActivationsQuery {
    pub module_id: i64,
}

/// Query parameters for resolving a scope context
#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    pub module_id: i64,
    pub country_id: Option<i64>,
    pub property_type_id: Option<i64>,
    pub premises_type_id: Option<i64>,
    pub area_id: Option<i64>,
}

pub async fn list_activations(
    service: Arc<ConfigService>,
    tenant: TenantId,
    Query(query): Query<ListActivationsQuery>,
) -> Result<Json<ActivationsListResponse>, Problem> {
    let items: Vec<ActivationDetailsDto> = service
        .list_activations(tenant.as_uuid(), query.module_id)
        .await
        .map_err(map_domain_error)?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = items.len();
    Ok(Json(ActivationsListResponse { items, total }))
}

pub async fn create_activation(
    service: Arc<ConfigService>,
    tenant: TenantId,
    Json(req): Json<CreateActivationRequest>,
) -> Result<(StatusCode, Json<ActivationDto>), Problem> {
    let activation = service
        .create_activation(tenant.as_uuid(), req.into())
        .await
        .map_err(map_domain_error)?;
    Ok((StatusCode::CREATED, Json(activation.into())))
}

pub async fn update_activation(
    service: Arc<ConfigService>,
    tenant: TenantId,
    Path(activation_id): Path<i64>,
    Json(req): Json<UpdateActivationRequest>,
) -> Result<Json<ActivationDto>, Problem> {
    let activation = service
        .update_activation(tenant.as_uuid(), activation_id, req.into())
        .await
        .map_err(map_domain_error)?;
    Ok(Json(activation.into()))
}

pub async fn resolve_fields(
    service: Arc<ConfigService>,
    tenant: TenantId,
    Query(query): Query<ResolveQuery>,
) -> Result<Json<ResolveResponse>, Problem> {
    let ctx = ScopeContext {
        country_id: query.country_id,
        property_type_id: query.property_type_id,
        premises_type_id: query.premises_type_id,
        area_id: query.area_id,
    };
    let resolved = service
        .resolve(tenant.as_uuid(), query.module_id, ctx)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(resolved.into()))
}
