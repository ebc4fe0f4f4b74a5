//! Route registration for the module configuration API

use super::{dto::*, handlers};
use crate::domain::ConfigService;
use axum::{
    routing::{delete, get, post, put},
    Extension, Router,
};
use std::sync::Arc;
use tenant_context::TenantId;

/// Mount all module configuration routes onto `router`.
///
/// Catalog routes are global; everything else reads the tenant from the
/// `x-tenant-id` header.
pub fn register_routes(router: Router, service: Arc<ConfigService>) -> Router {
    router
        // Catalog endpoints
        .route("/catalog/modules", get(list_modules_handler))
        .route("/catalog/scope-values", get(get_scope_catalog_handler))
        .route("/catalog/statuses", get(list_statuses_handler))
        // Field section endpoints
        .route("/schema/sections", post(create_section_handler))
        .route("/schema/sections", get(list_sections_handler))
        .route("/schema/sections/{section_id}", put(update_section_handler))
        .route(
            "/schema/sections/{section_id}",
            delete(delete_section_handler),
        )
        // Field definition endpoints
        .route("/schema/fields", post(create_field_handler))
        .route("/schema/fields", get(list_fields_handler))
        .route("/schema/fields/batch", post(create_fields_handler))
        .route("/schema/fields/{field_id}", get(get_field_handler))
        .route("/schema/fields/{field_id}", put(update_field_handler))
        .route("/schema/fields/{field_id}", delete(delete_field_handler))
        // Activation endpoints
        .route("/activations", get(list_activations_handler))
        .route("/activations", post(create_activation_handler))
        .route("/activations/resolve", get(resolve_fields_handler))
        .route(
            "/activations/{activation_id}",
            put(update_activation_handler),
        )
        // Add service as extension for handlers
        .layer(Extension(service))
}

// ===== Handler wrappers that extract service from Extension =====

async fn list_modules_handler(
    Extension(service): Extension<Arc<ConfigService>>,
) -> Result<axum::Json<ModulesListResponse>, super::error::Problem> {
    handlers::list_modules(service).await
}

async fn get_scope_catalog_handler(
    Extension(service): Extension<Arc<ConfigService>>,
) -> Result<axum::Json<ScopeCatalogDto>, super::error::Problem> {
    handlers::get_scope_catalog(service).await
}

async fn list_statuses_handler(
    Extension(service): Extension<Arc<ConfigService>>,
) -> Result<axum::Json<StatusesListResponse>, super::error::Problem> {
    handlers::list_statuses(service).await
}

async fn create_section_handler(
    Extension(service): Extension<Arc<ConfigService>>,
    tenant: TenantId,
    json: axum::Json<CreateSectionRequest>,
) -> Result<(axum::http::StatusCode, axum::Json<SectionDto>), super::error::Problem> {
    handlers::create_section(service, tenant, json).await
}

async fn list_sections_handler(
    Extension(service): Extension<Arc<ConfigService>>,
    tenant: TenantId,
    query: axum::extract::Query<handlers::ListSectionsQuery>,
) -> Result<axum::Json<SectionsListResponse>, super::error::Problem> {
    handlers::list_sections(service, tenant, query).await
}

async fn update_section_handler(
    Extension(service): Extension<Arc<ConfigService>>,
    tenant: TenantId,
    path: axum::extract::Path<i64>,
    json: axum::Json<UpdateSectionRequest>,
) -> Result<axum::Json<SectionDto>, super::error::Problem> {
    handlers::update_section(service, tenant, path, json).await
}

async fn delete_section_handler(
    Extension(service): Extension<Arc<ConfigService>>,
    tenant: TenantId,
    path: axum::extract::Path<i64>,
) -> Result<axum::http::StatusCode, super::error::Problem> {
    handlers::delete_section(service, tenant, path).await
}

async fn create_field_handler(
    Extension(service): Extension<Arc<ConfigService>>,
    tenant: TenantId,
    json: axum::Json<UpsertFieldRequest>,
) -> Result<(axum::http::StatusCode, axum::Json<FieldDto>), super::error::Problem> {
    handlers::create_field(service, tenant, json).await
}

async fn create_fields_handler(
    Extension(service): Extension<Arc<ConfigService>>,
    tenant: TenantId,
    json: axum::Json<CreateFieldsRequest>,
) -> Result<(axum::http::StatusCode, axum::Json<FieldsListResponse>), super::error::Problem> {
    handlers::create_fields(service, tenant, json).await
}

async fn get_field_handler(
    Extension(service): Extension<Arc<ConfigService>>,
    tenant: TenantId,
    path: axum::extract::Path<i64>,
) -> Result<axum::Json<FieldDto>, super::error::Problem> {
    handlers::get_field(service, tenant, path).await
}

async fn list_fields_handler(
    Extension(service): Extension<Arc<ConfigService>>,
    tenant: TenantId,
    query: axum::extract::Query<handlers::ListFieldsQuery>,
) -> Result<axum::Json<FieldsListResponse>, super::error::Problem> {
    handlers::list_fields(service, tenant, query).await
}

async fn update_field_handler(
    Extension(service): Extension<Arc<ConfigService>>,
    tenant: TenantId,
    path: axum::extract::Path<i64>,
    json: axum::Json<UpsertFieldRequest>,
) -> Result<axum::Json<FieldDto>, super::error::Problem> {
    handlers::update_field(service, tenant, path, json).await
}

async fn delete_field_handler(
    Extension(service): Extension<Arc<ConfigService>>,
    tenant: TenantId,
    path: axum::extract::Path<i64>,
) -> Result<axum::http::StatusCode, super::error::Problem> {
    handlers::delete_field(service, tenant, path).await
}

async fn list_activations_handler(
    Extension(service): Extension<Arc<ConfigService>>,
    tenant: TenantId,
    query: axum::extract::Query<handlers::ListActivationsQuery>,
) -> Result<axum::Json<ActivationsListResponse>, super::error::Problem> {
    handlers::list_activations(service, tenant, query).await
}

async fn create_activation_handler(
    Extension(service): Extension<Arc<ConfigService>>,
    tenant: TenantId,
    json: axum::Json<CreateActivationRequest>,
) -> Result<(axum::http::StatusCode, axum::Json<ActivationDto>), super::error::Problem> {
    handlers::create_activation(service, tenant, json).await
}

async fn update_activation_handler(
    Extension(service): Extension<Arc<ConfigService>>,
    tenant: TenantId,
    path: axum::extract::Path<i64>,
    json: axum::Json<UpdateActivationRequest>,
) -> Result<axum::Json<ActivationDto>, super::error::Problem> {
    handlers::update_activation(service, tenant, path, json).await
}

async fn resolve_fields_handler(
    Extension(service): Extension<Arc<ConfigService>>,
    tenant: TenantId,
    query: axum::extract::Query<handlers::ResolveQuery>,
) -> Result<axum::Json<ResolveResponse>, super::error::Problem> {
    handlers::resolve_fields(service, tenant, query).await
}
