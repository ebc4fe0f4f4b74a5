//! REST DTOs with serde derives for HTTP API

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ===== Catalog DTOs =====

/// Platform module
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ModuleDto {
    pub id: i64,

    #[schema(example = "Premises")]
    pub name: String,

    /// Whether new activations may reference this module
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ModulesListResponse {
    pub items: Vec<ModuleDto>,
    pub total: usize,
}

/// One value of a scope dimension catalog
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScopeValueDto {
    pub id: i64,

    #[schema(example = "United Kingdom")]
    pub label: String,
}

/// All four scope dimension catalogs
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScopeCatalogDto {
    pub countries: Vec<ScopeValueDto>,
    pub property_types: Vec<ScopeValueDto>,
    pub premises_types: Vec<ScopeValueDto>,
    pub areas: Vec<ScopeValueDto>,
}

/// Platform-seeded status label
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusDto {
    pub id: i64,

    #[schema(example = "Active")]
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusesListResponse {
    pub items: Vec<StatusDto>,
    pub total: usize,
}

// ===== Field schema DTOs =====

/// Field section response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SectionDto {
    pub id: i64,
    pub module_id: i64,

    #[schema(example = "Compliance")]
    pub name: String,

    pub sort_order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SectionsListResponse {
    pub items: Vec<SectionDto>,
    pub total: usize,
}

/// Create a field section
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateSectionRequest {
    pub module_id: i64,

    #[schema(example = "Compliance")]
    pub name: String,

    #[serde(default)]
    pub sort_order: i32,
}

/// Replace a section's name and ordering; the module binding is immutable
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateSectionRequest {
    pub name: String,

    #[serde(default)]
    pub sort_order: i32,
}

/// Option of a choice-type field
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FieldOptionDto {
    pub id: i64,

    #[schema(example = "Leasehold")]
    pub label: String,

    #[schema(example = "leasehold")]
    pub value: String,

    pub sort_order: i32,
}

/// Field definition response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FieldDto {
    pub id: i64,
    pub section_id: i64,
    pub module_id: i64,

    /// Stable machine key, unique within the section
    #[schema(example = "lease_expiry_date")]
    pub key: String,

    #[schema(example = "Lease Expiry (Date)")]
    pub label: String,

    #[serde(rename = "type")]
    #[schema(example = "date")]
    pub field_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    pub required: bool,
    pub active: bool,
    pub sort_order: i32,

    /// Present for dropdown, radio and checkbox fields
    pub options: Vec<FieldOptionDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FieldsListResponse {
    pub items: Vec<FieldDto>,
    pub total: usize,
}

/// Option payload inside a field request; `value` defaults to the
/// slugified label
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OptionDraftDto {
    #[schema(example = "Leasehold")]
    pub label: String,

    pub value: Option<String>,
}

/// Create or replace a field definition
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpsertFieldRequest {
    pub section_id: i64,

    #[schema(example = "Lease Expiry (Date)")]
    pub label: String,

    /// Explicit key; derived from the label when absent
    pub key: Option<String>,

    #[serde(rename = "type")]
    #[schema(example = "date")]
    pub field_type: String,

    pub placeholder: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(default = "default_true")]
    pub active: bool,

    #[serde(default)]
    pub sort_order: i32,

    #[serde(default)]
    pub options: Vec<OptionDraftDto>,
}

/// Create several fields of one section atomically
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateFieldsRequest {
    pub fields: Vec<UpsertFieldRequest>,
}

// ===== Activation DTOs =====

/// Activation row as written; `null` scope ids are wildcards
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActivationDto {
    pub id: i64,
    pub module_id: i64,
    pub enabled: bool,
    pub country_id: Option<i64>,
    pub property_type_id: Option<i64>,
    pub premises_type_id: Option<i64>,
    pub area_id: Option<i64>,
    pub status_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Activation decorated with catalog labels and its field selection
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActivationDetailsDto {
    pub id: i64,
    pub module_id: i64,
    pub enabled: bool,

    pub country_id: Option<i64>,
    #[schema(example = "United Kingdom")]
    pub country: Option<String>,

    pub property_type_id: Option<i64>,
    pub property_type: Option<String>,

    pub premises_type_id: Option<i64>,
    pub premises_type: Option<String>,

    pub area_id: Option<i64>,
    pub area: Option<String>,

    pub status_id: Option<i64>,
    pub status: Option<String>,

    pub selected_field_ids: Vec<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActivationsListResponse {
    pub items: Vec<ActivationDetailsDto>,
    pub total: usize,
}

/// Activate a module under a scope
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateActivationRequest {
    pub module_id: i64,

    #[serde(default = "default_true")]
    pub enabled: bool,

    pub country_id: Option<i64>,
    pub property_type_id: Option<i64>,
    pub premises_type_id: Option<i64>,
    pub area_id: Option<i64>,
    pub status_id: Option<i64>,

    #[serde(default)]
    pub selected_field_ids: Vec<i64>,
}

/// Replace an activation's scope, flag and selection; the module binding
/// is immutable
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateActivationRequest {
    #[serde(default = "default_true")]
    pub enabled: bool,

    pub country_id: Option<i64>,
    pub property_type_id: Option<i64>,
    pub premises_type_id: Option<i64>,
    pub area_id: Option<i64>,
    pub status_id: Option<i64>,

    #[serde(default)]
    pub selected_field_ids: Vec<i64>,
}

/// Winning activation for a scope context; empty when nothing matched
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResolveResponse {
    pub activation_id: Option<i64>,
    pub selected_field_ids: Vec<i64>,
}

fn default_true() -> bool {
    true
}
