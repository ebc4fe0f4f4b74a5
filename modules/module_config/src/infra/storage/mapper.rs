//! Conversions between SeaORM models and contract models

use sea_orm::ActiveValue::{NotSet, Set};

use crate::contract::model::{
    Activation, FieldDefinition, FieldOption, FieldSection, FieldType, Module, ScopeTuple,
    ScopeValue, Status,
};

use super::entity::{
    activation, area, country, field_definition, field_option, field_section, module,
    premises_type, property_type, status,
};

impl From<module::Model> for Module {
    fn from(m: module::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            active: m.active,
        }
    }
}

impl From<country::Model> for ScopeValue {
    fn from(m: country::Model) -> Self {
        Self {
            id: m.id,
            label: m.label,
        }
    }
}

impl From<property_type::Model> for ScopeValue {
    fn from(m: property_type::Model) -> Self {
        Self {
            id: m.id,
            label: m.label,
        }
    }
}

impl From<premises_type::Model> for ScopeValue {
    fn from(m: premises_type::Model) -> Self {
        Self {
            id: m.id,
            label: m.label,
        }
    }
}

impl From<area::Model> for ScopeValue {
    fn from(m: area::Model) -> Self {
        Self {
            id: m.id,
            label: m.label,
        }
    }
}

impl From<status::Model> for Status {
    fn from(m: status::Model) -> Self {
        Self {
            id: m.id,
            label: m.label,
        }
    }
}

impl From<field_section::Model> for FieldSection {
    fn from(m: field_section::Model) -> Self {
        Self {
            id: m.id,
            tenant_id: m.tenant_id,
            module_id: m.module_id,
            name: m.name,
            sort_order: m.sort_order,
        }
    }
}

/// `id == 0` marks a row that has not been assigned an id yet
pub fn section_active_model(section: &FieldSection) -> field_section::ActiveModel {
    field_section::ActiveModel {
        id: if section.id == 0 {
            NotSet
        } else {
            Set(section.id)
        },
        tenant_id: Set(section.tenant_id),
        module_id: Set(section.module_id),
        name: Set(section.name.clone()),
        sort_order: Set(section.sort_order),
    }
}

impl From<field_option::Model> for FieldOption {
    fn from(m: field_option::Model) -> Self {
        Self {
            id: m.id,
            field_id: m.field_id,
            label: m.label,
            value: m.value,
            sort_order: m.sort_order,
        }
    }
}

/// Assemble a field from its row and its option rows.
///
/// A stored type string no release knows anymore degrades to `text`
/// instead of poisoning every read of the section.
pub fn field_from_models(
    field: field_definition::Model,
    options: Vec<field_option::Model>,
) -> FieldDefinition {
    FieldDefinition {
        id: field.id,
        tenant_id: field.tenant_id,
        module_id: field.module_id,
        section_id: field.section_id,
        key: field.key,
        label: field.label,
        field_type: FieldType::parse(&field.field_type).unwrap_or(FieldType::Text),
        placeholder: field.placeholder,
        required: field.required,
        active: field.active,
        sort_order: field.sort_order,
        options: options.into_iter().map(FieldOption::from).collect(),
    }
}

pub fn field_active_model(field: &FieldDefinition) -> field_definition::ActiveModel {
    field_definition::ActiveModel {
        id: if field.id == 0 { NotSet } else { Set(field.id) },
        tenant_id: Set(field.tenant_id),
        module_id: Set(field.module_id),
        section_id: Set(field.section_id),
        key: Set(field.key.clone()),
        label: Set(field.label.clone()),
        field_type: Set(field.field_type.as_str().to_string()),
        placeholder: Set(field.placeholder.clone()),
        required: Set(field.required),
        active: Set(field.active),
        sort_order: Set(field.sort_order),
    }
}

pub fn option_active_model(field_id: i64, option: &FieldOption) -> field_option::ActiveModel {
    field_option::ActiveModel {
        id: NotSet,
        field_id: Set(field_id),
        label: Set(option.label.clone()),
        value: Set(option.value.clone()),
        sort_order: Set(option.sort_order),
    }
}

impl From<activation::Model> for Activation {
    fn from(m: activation::Model) -> Self {
        Self {
            id: m.id,
            tenant_id: m.tenant_id,
            module_id: m.module_id,
            enabled: m.enabled,
            scope: ScopeTuple {
                country_id: m.country_id,
                property_type_id: m.property_type_id,
                premises_type_id: m.premises_type_id,
                area_id: m.area_id,
            },
            status_id: m.status_id,
            created_at: m.created_at,
        }
    }
}

pub fn activation_active_model(activation: &Activation) -> activation::ActiveModel {
    activation::ActiveModel {
        id: if activation.id == 0 {
            NotSet
        } else {
            Set(activation.id)
        },
        tenant_id: Set(activation.tenant_id),
        module_id: Set(activation.module_id),
        enabled: Set(activation.enabled),
        country_id: Set(activation.scope.country_id),
        property_type_id: Set(activation.scope.property_type_id),
        premises_type_id: Set(activation.scope.premises_type_id),
        area_id: Set(activation.scope.area_id),
        status_id: Set(activation.status_id),
        created_at: Set(activation.created_at),
    }
}
