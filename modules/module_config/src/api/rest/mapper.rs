//! Mapper implementations for converting between DTOs and contract models

use super::dto::*;
use crate::contract::model::{
    Activation, ActivationDetails, ActivationDraft, ActivationUpdate, FieldDefinition, FieldDraft,
    FieldOption, FieldSection, FieldType, Module, OptionDraft, ResolvedFields, ScopeCatalog,
    ScopeTuple, ScopeValue, SectionDraft, Status,
};
use crate::contract::ConfigError;

// ===== Catalog conversions =====

impl From<Module> for ModuleDto {
    fn from(module: Module) -> Self {
        Self {
            id: module.id,
            name: module.name,
            active: module.active,
        }
    }
}

impl From<ScopeValue> for ScopeValueDto {
    fn from(value: ScopeValue) -> Self {
        Self {
            id: value.id,
            label: value.label,
        }
    }
}

impl From<ScopeCatalog> for ScopeCatalogDto {
    fn from(catalog: ScopeCatalog) -> Self {
        Self {
            countries: catalog.countries.into_iter().map(Into::into).collect(),
            property_types: catalog.property_types.into_iter().map(Into::into).collect(),
            premises_types: catalog.premises_types.into_iter().map(Into::into).collect(),
            areas: catalog.areas.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Status> for StatusDto {
    fn from(status: Status) -> Self {
        Self {
            id: status.id,
            label: status.label,
        }
    }
}

// ===== Field schema conversions =====

impl From<FieldSection> for SectionDto {
    fn from(section: FieldSection) -> Self {
        Self {
            id: section.id,
            module_id: section.module_id,
            name: section.name,
            sort_order: section.sort_order,
        }
    }
}

impl From<CreateSectionRequest> for SectionDraft {
    fn from(req: CreateSectionRequest) -> Self {
        Self {
            module_id: req.module_id,
            name: req.name,
            sort_order: req.sort_order,
        }
    }
}

impl From<FieldOption> for FieldOptionDto {
    fn from(option: FieldOption) -> Self {
        Self {
            id: option.id,
            label: option.label,
            value: option.value,
            sort_order: option.sort_order,
        }
    }
}

impl From<FieldDefinition> for FieldDto {
    fn from(field: FieldDefinition) -> Self {
        Self {
            id: field.id,
            section_id: field.section_id,
            module_id: field.module_id,
            key: field.key,
            label: field.label,
            field_type: field.field_type.as_str().to_string(),
            placeholder: field.placeholder,
            required: field.required,
            active: field.active,
            sort_order: field.sort_order,
            options: field.options.into_iter().map(Into::into).collect(),
        }
    }
}

impl TryFrom<UpsertFieldRequest> for FieldDraft {
    type Error = ConfigError;

    fn try_from(req: UpsertFieldRequest) -> Result<Self, Self::Error> {
        let field_type =
            FieldType::parse(&req.field_type).ok_or_else(|| ConfigError::Validation {
                message: format!("unknown field type '{}'", req.field_type),
            })?;
        Ok(Self {
            section_id: req.section_id,
            label: req.label,
            key: req.key,
            field_type,
            placeholder: req.placeholder,
            required: req.required,
            active: req.active,
            sort_order: req.sort_order,
            options: req
                .options
                .into_iter()
                .map(|o| OptionDraft {
                    label: o.label,
                    value: o.value,
                })
                .collect(),
        })
    }
}

// ===== Activation conversions =====

impl From<Activation> for ActivationDto {
    fn from(activation: Activation) -> Self {
        Self {
            id: activation.id,
            module_id: activation.module_id,
            enabled: activation.enabled,
            country_id: activation.scope.country_id,
            property_type_id: activation.scope.property_type_id,
            premises_type_id: activation.scope.premises_type_id,
            area_id: activation.scope.area_id,
            status_id: activation.status_id,
            created_at: activation.created_at,
        }
    }
}

impl From<ActivationDetails> for ActivationDetailsDto {
    fn from(details: ActivationDetails) -> Self {
        let activation = details.activation;
        Self {
            id: activation.id,
            module_id: activation.module_id,
            enabled: activation.enabled,
            country_id: activation.scope.country_id,
            country: details.country,
            property_type_id: activation.scope.property_type_id,
            property_type: details.property_type,
            premises_type_id: activation.scope.premises_type_id,
            premises_type: details.premises_type,
            area_id: activation.scope.area_id,
            area: details.area,
            status_id: activation.status_id,
            status: details.status,
            selected_field_ids: details.selected_field_ids,
            created_at: activation.created_at,
        }
    }
}

impl From<CreateActivationRequest> for ActivationDraft {
    fn from(req: CreateActivationRequest) -> Self {
        Self {
            module_id: req.module_id,
            enabled: req.enabled,
            scope: ScopeTuple {
                country_id: req.country_id,
                property_type_id: req.property_type_id,
                premises_type_id: req.premises_type_id,
                area_id: req.area_id,
            },
            status_id: req.status_id,
            selected_field_ids: req.selected_field_ids,
        }
    }
}

impl From<UpdateActivationRequest> for ActivationUpdate {
    fn from(req: UpdateActivationRequest) -> Self {
        Self {
            enabled: req.enabled,
            scope: ScopeTuple {
                country_id: req.country_id,
                property_type_id: req.property_type_id,
                premises_type_id: req.premises_type_id,
                area_id: req.area_id,
            },
            status_id: req.status_id,
            selected_field_ids: req.selected_field_ids,
        }
    }
}

impl From<ResolvedFields> for ResolveResponse {
    fn from(resolved: ResolvedFields) -> Self {
        Self {
            activation_id: resolved.activation_id,
            selected_field_ids: resolved.selected_field_ids,
        }
    }
}
