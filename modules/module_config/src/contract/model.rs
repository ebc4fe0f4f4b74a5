//! Contract models for the module configuration engine
//!
//! These models are transport-agnostic and used across the domain and
//! storage layers. NO serde derives - these are pure domain models.

use chrono::{DateTime, Utc};
use uuid::Uuid;

// ===== Catalog models =====

/// Platform module that tenants can activate (Premises, Vehicles, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub id: i64,
    pub name: String,
    /// Inactive modules are kept for historical rows but cannot be activated
    pub active: bool,
}

/// The four scoping dimensions an activation can be narrowed by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeDimension {
    Country,
    PropertyType,
    PremisesType,
    Area,
}

impl ScopeDimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::PropertyType => "property_type",
            Self::PremisesType => "premises_type",
            Self::Area => "area",
        }
    }
}

/// One entry of a scope dimension catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeValue {
    pub id: i64,
    pub label: String,
}

/// All four scope dimension catalogs in one read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeCatalog {
    pub countries: Vec<ScopeValue>,
    pub property_types: Vec<ScopeValue>,
    pub premises_types: Vec<ScopeValue>,
    pub areas: Vec<ScopeValue>,
}

/// Platform-seeded status label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub id: i64,
    pub label: String,
}

// ===== Field schema models =====

/// Grouping of fields inside a module's tenant-defined schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSection {
    pub id: i64,
    pub tenant_id: Uuid,
    pub module_id: i64,
    pub name: String,
    pub sort_order: i32,
}

/// Input for creating a section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionDraft {
    pub module_id: i64,
    pub name: String,
    pub sort_order: i32,
}

/// Renderable field type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Textarea,
    Number,
    Decimal,
    Date,
    Time,
    Datetime,
    Dropdown,
    Radio,
    Checkbox,
    Switch,
    Email,
    Url,
    Phone,
    File,
    Image,
    Signature,
    Richtext,
    SectionBreak,
    Hidden,
}

impl FieldType {
    /// Wire and storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Number => "number",
            Self::Decimal => "decimal",
            Self::Date => "date",
            Self::Time => "time",
            Self::Datetime => "datetime",
            Self::Dropdown => "dropdown",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::Switch => "switch",
            Self::Email => "email",
            Self::Url => "url",
            Self::Phone => "phone",
            Self::File => "file",
            Self::Image => "image",
            Self::Signature => "signature",
            Self::Richtext => "richtext",
            Self::SectionBreak => "section_break",
            Self::Hidden => "hidden",
        }
    }

    /// Parse the wire/storage representation
    pub fn parse(s: &str) -> Option<Self> {
        let t = match s {
            "text" => Self::Text,
            "textarea" => Self::Textarea,
            "number" => Self::Number,
            "decimal" => Self::Decimal,
            "date" => Self::Date,
            "time" => Self::Time,
            "datetime" => Self::Datetime,
            "dropdown" => Self::Dropdown,
            "radio" => Self::Radio,
            "checkbox" => Self::Checkbox,
            "switch" => Self::Switch,
            "email" => Self::Email,
            "url" => Self::Url,
            "phone" => Self::Phone,
            "file" => Self::File,
            "image" => Self::Image,
            "signature" => Self::Signature,
            "richtext" => Self::Richtext,
            "section_break" => Self::SectionBreak,
            "hidden" => Self::Hidden,
            _ => return None,
        };
        Some(t)
    }

    /// Whether this type carries a selectable option list
    pub fn has_options(&self) -> bool {
        matches!(self, Self::Dropdown | Self::Radio | Self::Checkbox)
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tenant-defined field inside a section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    pub id: i64,
    pub tenant_id: Uuid,
    pub module_id: i64,
    pub section_id: i64,
    /// Stable machine key, unique within the section
    pub key: String,
    pub label: String,
    pub field_type: FieldType,
    pub placeholder: Option<String>,
    pub required: bool,
    pub active: bool,
    pub sort_order: i32,
    /// Option list; only populated for choice types
    pub options: Vec<FieldOption>,
}

/// Selectable option of a choice-type field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOption {
    pub id: i64,
    pub field_id: i64,
    pub label: String,
    pub value: String,
    pub sort_order: i32,
}

/// Input for creating or updating a field
///
/// `key` and the option `value`s are derived from the labels when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDraft {
    pub section_id: i64,
    pub label: String,
    pub key: Option<String>,
    pub field_type: FieldType,
    pub placeholder: Option<String>,
    pub required: bool,
    pub active: bool,
    pub sort_order: i32,
    pub options: Vec<OptionDraft>,
}

/// Input for one option of a choice-type field; order in the list is kept
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDraft {
    pub label: String,
    pub value: Option<String>,
}

// ===== Activation models =====

/// The four optional scope dimensions of an activation row.
///
/// `None` means "applies regardless of this dimension". Structural equality
/// treats two `None`s as equal, which is exactly the null-aware tuple
/// comparison the duplicate check needs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScopeTuple {
    pub country_id: Option<i64>,
    pub property_type_id: Option<i64>,
    pub premises_type_id: Option<i64>,
    pub area_id: Option<i64>,
}

impl ScopeTuple {
    /// Number of constrained dimensions (0-4)
    pub fn specificity(&self) -> u8 {
        [
            self.country_id,
            self.property_type_id,
            self.premises_type_id,
            self.area_id,
        ]
        .iter()
        .filter(|d| d.is_some())
        .count() as u8
    }
}

/// Caller-supplied partial scope at resolution time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScopeContext {
    pub country_id: Option<i64>,
    pub property_type_id: Option<i64>,
    pub premises_type_id: Option<i64>,
    pub area_id: Option<i64>,
}

/// One tenant configuration of a module under a scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    pub id: i64,
    pub tenant_id: Uuid,
    pub module_id: i64,
    /// Disabled rows are kept but never resolved against
    pub enabled: bool,
    pub scope: ScopeTuple,
    pub status_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating an activation together with its field selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationDraft {
    pub module_id: i64,
    pub enabled: bool,
    pub scope: ScopeTuple,
    pub status_id: Option<i64>,
    pub selected_field_ids: Vec<i64>,
}

/// Input for updating an activation; the module binding is immutable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationUpdate {
    pub enabled: bool,
    pub scope: ScopeTuple,
    pub status_id: Option<i64>,
    pub selected_field_ids: Vec<i64>,
}

/// Activation decorated with catalog labels and its selection, for listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationDetails {
    pub activation: Activation,
    pub country: Option<String>,
    pub property_type: Option<String>,
    pub premises_type: Option<String>,
    pub area: Option<String>,
    pub status: Option<String>,
    pub selected_field_ids: Vec<i64>,
}

/// Result of a specificity resolution
///
/// `activation_id` is `None` when no enabled activation matched; an
/// unresolved context is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFields {
    pub activation_id: Option<i64>,
    pub selected_field_ids: Vec<i64>,
}

impl ResolvedFields {
    pub fn empty() -> Self {
        Self {
            activation_id: None,
            selected_field_ids: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_type_round_trips_through_wire_form() {
        let all = [
            FieldType::Text,
            FieldType::Textarea,
            FieldType::Number,
            FieldType::Decimal,
            FieldType::Date,
            FieldType::Time,
            FieldType::Datetime,
            FieldType::Dropdown,
            FieldType::Radio,
            FieldType::Checkbox,
            FieldType::Switch,
            FieldType::Email,
            FieldType::Url,
            FieldType::Phone,
            FieldType::File,
            FieldType::Image,
            FieldType::Signature,
            FieldType::Richtext,
            FieldType::SectionBreak,
            FieldType::Hidden,
        ];
        for t in all {
            assert_eq!(FieldType::parse(t.as_str()), Some(t));
        }
        assert_eq!(FieldType::parse("select"), None);
    }

    #[test]
    fn only_choice_types_carry_options() {
        assert!(FieldType::Dropdown.has_options());
        assert!(FieldType::Radio.has_options());
        assert!(FieldType::Checkbox.has_options());
        assert!(!FieldType::Switch.has_options());
        assert!(!FieldType::Text.has_options());
    }

    #[test]
    fn scope_tuple_counts_constrained_dimensions() {
        assert_eq!(ScopeTuple::default().specificity(), 0);
        let scope = ScopeTuple {
            country_id: Some(1),
            area_id: Some(4),
            ..Default::default()
        };
        assert_eq!(scope.specificity(), 2);
    }

    #[test]
    fn scope_tuple_equality_is_null_aware() {
        assert_eq!(ScopeTuple::default(), ScopeTuple::default());
        let a = ScopeTuple {
            country_id: Some(1),
            ..Default::default()
        };
        let b = ScopeTuple {
            country_id: Some(1),
            ..Default::default()
        };
        assert_eq!(a, b);
        assert_ne!(a, ScopeTuple::default());
    }
}
