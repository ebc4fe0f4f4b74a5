//! REST DTOs with serde derives for HTTP API
//!
//! Write payloads flatten an open bag of extra keys next to the typed
//! core fields; serde claims the core fields during deserialization and
//! everything unclaimed lands in the bag. Read payloads flatten the
//! stored attributes back out the same way.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ===== Premise DTOs =====

/// Premise detail with its dynamic attributes flattened in
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PremiseDto {
    pub id: i64,

    #[schema(example = "Riverside House")]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<i64>,

    pub created_at: DateTime<Utc>,

    /// Schema-driven key/value pairs stored alongside the core columns
    #[serde(flatten)]
    pub attributes: BTreeMap<String, String>,
}

/// Premise core columns, without attributes
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PremiseSummaryDto {
    pub id: i64,
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<i64>,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PremisesListResponse {
    pub items: Vec<PremiseSummaryDto>,
    pub total: usize,
}

/// Create or fully replace a premise.
///
/// Any key not named here is persisted as a dynamic attribute.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpsertPremiseRequest {
    #[schema(example = "Riverside House")]
    pub name: String,

    #[serde(default)]
    pub address: Option<String>,

    #[serde(default)]
    pub country_id: Option<i64>,

    #[serde(default)]
    pub area_id: Option<i64>,

    #[serde(default)]
    pub status_id: Option<i64>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

// ===== Vehicle DTOs =====

/// Vehicle detail with its dynamic attributes flattened in
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VehicleDto {
    pub id: i64,

    #[schema(example = "LM71 XKB")]
    pub registration_no: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<i64>,

    pub created_at: DateTime<Utc>,

    #[serde(flatten)]
    pub attributes: BTreeMap<String, String>,
}

/// Vehicle core columns, without attributes
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VehicleSummaryDto {
    pub id: i64,
    pub registration_no: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<i64>,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VehiclesListResponse {
    pub items: Vec<VehicleSummaryDto>,
    pub total: usize,
}

/// Create or fully replace a vehicle.
///
/// Any key not named here is persisted as a dynamic attribute.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpsertVehicleRequest {
    #[schema(example = "LM71 XKB")]
    pub registration_no: String,

    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub country_id: Option<i64>,

    #[serde(default)]
    pub area_id: Option<i64>,

    #[serde(default)]
    pub status_id: Option<i64>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}
