//! Asset registry domain models
//!
//! Each entity is a small fixed relational core plus an open attribute
//! map persisted row-per-key. Attribute values are stored as strings;
//! the REST layer is responsible for serializing richer JSON values
//! down to that form.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A registered premise with its dynamic attributes
#[derive(Debug, Clone, PartialEq)]
pub struct Premise {
    pub id: i64,
    pub tenant_id: Uuid,
    pub name: String,
    pub address: Option<String>,
    /// Soft reference into the country catalog
    pub country_id: Option<i64>,
    /// Soft reference into the area catalog
    pub area_id: Option<i64>,
    /// Soft reference into the status catalog
    pub status_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    /// Dynamic key/value pairs layered on top of the core columns
    pub attributes: BTreeMap<String, String>,
}

/// Core columns of a premise, without the attribute map
#[derive(Debug, Clone, PartialEq)]
pub struct PremiseSummary {
    pub id: i64,
    pub tenant_id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub country_id: Option<i64>,
    pub area_id: Option<i64>,
    pub status_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating or fully replacing a premise
#[derive(Debug, Clone, PartialEq)]
pub struct PremiseDraft {
    pub name: String,
    pub address: Option<String>,
    pub country_id: Option<i64>,
    pub area_id: Option<i64>,
    pub status_id: Option<i64>,
    pub attributes: BTreeMap<String, String>,
}

/// A registered vehicle with its dynamic attributes
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: i64,
    pub tenant_id: Uuid,
    /// Unique per tenant
    pub registration_no: String,
    pub label: Option<String>,
    pub country_id: Option<i64>,
    pub area_id: Option<i64>,
    pub status_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub attributes: BTreeMap<String, String>,
}

/// Core columns of a vehicle, without the attribute map
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleSummary {
    pub id: i64,
    pub tenant_id: Uuid,
    pub registration_no: String,
    pub label: Option<String>,
    pub country_id: Option<i64>,
    pub area_id: Option<i64>,
    pub status_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating or fully replacing a vehicle
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleDraft {
    pub registration_no: String,
    pub label: Option<String>,
    pub country_id: Option<i64>,
    pub area_id: Option<i64>,
    pub status_id: Option<i64>,
    pub attributes: BTreeMap<String, String>,
}
