//! Attribute sweep for schema-driven entity payloads
//!
//! Write payloads carry a typed core plus an open bag of extra keys.
//! The core struct claims its own fields during deserialization, so by
//! the time a payload reaches the domain every unclaimed key is a
//! candidate attribute. These helpers turn that bag into the stored
//! string form and keep core column names from masquerading as
//! attributes on the way back out.

use std::collections::BTreeMap;

use serde_json::Value;

/// Column names the premise core claims for itself
pub const PREMISE_CORE_KEYS: &[&str] = &[
    "id",
    "tenant_id",
    "name",
    "address",
    "country_id",
    "area_id",
    "status_id",
    "created_at",
];

/// Column names the vehicle core claims for itself
pub const VEHICLE_CORE_KEYS: &[&str] = &[
    "id",
    "tenant_id",
    "registration_no",
    "label",
    "country_id",
    "area_id",
    "status_id",
    "created_at",
];

/// Serialize one submitted value down to the stored string form.
///
/// Strings pass through unquoted; numbers and booleans use their JSON
/// literal text; arrays and objects are stored as compact JSON. `null`
/// means "no value" and returns `None` so the key is dropped entirely.
pub fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => serde_json::to_string(other).ok(),
    }
}

/// Sweep an open payload bag into attribute form.
///
/// Blank keys and `null` values are dropped; everything else is
/// stringified. Core-named keys cannot appear here when the bag comes
/// from a flattened request, but programmatic callers get the same
/// treatment, so the guard runs unconditionally.
pub fn sweep(extra: &BTreeMap<String, Value>, core_keys: &[&str]) -> BTreeMap<String, String> {
    extra
        .iter()
        .filter(|(key, _)| !key.trim().is_empty() && !core_keys.contains(&key.as_str()))
        .filter_map(|(key, value)| stringify(value).map(|v| (key.clone(), v)))
        .collect()
}

/// Drop any stored attribute whose key collides with a core column.
///
/// Stored rows can only gain such keys through out-of-band writes, but
/// a collision must never overwrite a populated core column on read.
pub fn strip_core_keys(
    attributes: BTreeMap<String, String>,
    core_keys: &[&str],
) -> BTreeMap<String, String> {
    attributes
        .into_iter()
        .filter(|(key, _)| !core_keys.contains(&key.as_str()))
        .collect()
}
