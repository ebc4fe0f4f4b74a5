//! Domain service for the module configuration engine
//!
//! All tenant-facing operations pass through here: catalog reads, field
//! schema management, activation management and specificity resolution.
//! Repositories return `anyhow::Result`; this layer recovers typed
//! [`ConfigError`]s from those errors and turns everything else into
//! `ConfigError::Internal` after logging.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::config::Config;
use crate::contract::model::{
    Activation, ActivationDetails, ActivationDraft, ActivationUpdate, FieldDefinition, FieldDraft,
    FieldOption, FieldSection, FieldType, Module, OptionDraft, ResolvedFields, ScopeCatalog,
    ScopeContext, ScopeDimension, ScopeTuple, SectionDraft, Status,
};
use crate::contract::ConfigError;
use crate::domain::repository::{ActivationRepository, CatalogRepository, SchemaRepository};
use crate::domain::{resolver, slug};

pub struct ConfigService {
    catalog: Arc<dyn CatalogRepository>,
    schema: Arc<dyn SchemaRepository>,
    activations: Arc<dyn ActivationRepository>,
    config: Config,
}

impl ConfigService {
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        schema: Arc<dyn SchemaRepository>,
        activations: Arc<dyn ActivationRepository>,
        config: Config,
    ) -> Self {
        Self {
            catalog,
            schema,
            activations,
            config,
        }
    }

    // ===== Catalogs =====

    pub async fn list_modules(&self) -> Result<Vec<Module>, ConfigError> {
        self.catalog.list_modules().await.map_err(storage_error)
    }

    pub async fn scope_catalog(&self) -> Result<ScopeCatalog, ConfigError> {
        let countries = self
            .catalog
            .scope_values(ScopeDimension::Country)
            .await
            .map_err(storage_error)?;
        let property_types = self
            .catalog
            .scope_values(ScopeDimension::PropertyType)
            .await
            .map_err(storage_error)?;
        let premises_types = self
            .catalog
            .scope_values(ScopeDimension::PremisesType)
            .await
            .map_err(storage_error)?;
        let areas = self
            .catalog
            .scope_values(ScopeDimension::Area)
            .await
            .map_err(storage_error)?;
        Ok(ScopeCatalog {
            countries,
            property_types,
            premises_types,
            areas,
        })
    }

    pub async fn list_statuses(&self) -> Result<Vec<Status>, ConfigError> {
        self.catalog.list_statuses().await.map_err(storage_error)
    }

    // ===== Field sections =====

    pub async fn create_section(
        &self,
        tenant: Uuid,
        draft: SectionDraft,
    ) -> Result<FieldSection, ConfigError> {
        let module = self.require_active_module(draft.module_id).await?;
        let name = draft.name.trim().to_string();
        if name.is_empty() {
            return Err(ConfigError::Validation {
                message: "section name cannot be empty".to_string(),
            });
        }

        let section = FieldSection {
            id: 0,
            tenant_id: tenant,
            module_id: module.id,
            name,
            sort_order: draft.sort_order,
        };
        let created = self
            .schema
            .create_section(&section)
            .await
            .map_err(storage_error)?;
        tracing::info!(tenant = %tenant, module_id = module.id, section_id = created.id, "section created");
        Ok(created)
    }

    pub async fn list_sections(
        &self,
        tenant: Uuid,
        module_id: i64,
    ) -> Result<Vec<FieldSection>, ConfigError> {
        self.require_module(module_id).await?;
        self.schema
            .list_sections(tenant, module_id)
            .await
            .map_err(storage_error)
    }

    pub async fn update_section(
        &self,
        tenant: Uuid,
        section_id: i64,
        name: String,
        sort_order: i32,
    ) -> Result<FieldSection, ConfigError> {
        let mut section = self.require_section(tenant, section_id).await?;
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(ConfigError::Validation {
                message: "section name cannot be empty".to_string(),
            });
        }
        section.name = name;
        section.sort_order = sort_order;
        self.schema
            .update_section(&section)
            .await
            .map_err(storage_error)
    }

    /// Delete a section and everything hanging off it: fields, options and
    /// activation selections of those fields.
    pub async fn delete_section(&self, tenant: Uuid, section_id: i64) -> Result<(), ConfigError> {
        self.require_section(tenant, section_id).await?;
        self.schema
            .delete_section(tenant, section_id)
            .await
            .map_err(storage_error)?;
        tracing::info!(tenant = %tenant, section_id, "section deleted");
        Ok(())
    }

    // ===== Field definitions =====

    pub async fn create_field(
        &self,
        tenant: Uuid,
        draft: FieldDraft,
    ) -> Result<FieldDefinition, ConfigError> {
        let section = self.require_section(tenant, draft.section_id).await?;
        let existing = self
            .schema
            .list_fields(tenant, section.id)
            .await
            .map_err(storage_error)?;

        let field = assemble_field(tenant, &section, &draft, None)?;
        if existing.iter().any(|f| f.key == field.key) {
            return Err(duplicate_key(&field.key));
        }

        let created = self
            .schema
            .create_field(&field)
            .await
            .map_err(storage_error)?;
        tracing::info!(tenant = %tenant, section_id = section.id, field_id = created.id, key = %created.key, "field created");
        Ok(created)
    }

    /// Create several fields of one section atomically; if any draft fails
    /// validation, nothing is persisted.
    pub async fn create_fields(
        &self,
        tenant: Uuid,
        drafts: Vec<FieldDraft>,
    ) -> Result<Vec<FieldDefinition>, ConfigError> {
        if drafts.is_empty() {
            return Ok(Vec::new());
        }
        if drafts.len() > self.config.max_batch_fields {
            return Err(ConfigError::Validation {
                message: format!(
                    "batch of {} fields exceeds the limit of {}",
                    drafts.len(),
                    self.config.max_batch_fields
                ),
            });
        }
        let section_id = drafts[0].section_id;
        if drafts.iter().any(|d| d.section_id != section_id) {
            return Err(ConfigError::Validation {
                message: "all fields in a batch must target the same section".to_string(),
            });
        }

        let section = self.require_section(tenant, section_id).await?;
        let existing: HashSet<String> = self
            .schema
            .list_fields(tenant, section.id)
            .await
            .map_err(storage_error)?
            .into_iter()
            .map(|f| f.key)
            .collect();

        let mut seen: HashSet<String> = HashSet::new();
        let mut fields = Vec::with_capacity(drafts.len());
        for draft in &drafts {
            let field = assemble_field(tenant, &section, draft, None)?;
            if existing.contains(&field.key) || !seen.insert(field.key.clone()) {
                return Err(duplicate_key(&field.key));
            }
            fields.push(field);
        }

        let created = self
            .schema
            .create_fields(&fields)
            .await
            .map_err(storage_error)?;
        tracing::info!(tenant = %tenant, section_id = section.id, count = created.len(), "field batch created");
        Ok(created)
    }

    pub async fn get_field(
        &self,
        tenant: Uuid,
        field_id: i64,
    ) -> Result<FieldDefinition, ConfigError> {
        self.require_field(tenant, field_id).await
    }

    pub async fn list_fields(
        &self,
        tenant: Uuid,
        section_id: i64,
    ) -> Result<Vec<FieldDefinition>, ConfigError> {
        self.require_section(tenant, section_id).await?;
        self.schema
            .list_fields(tenant, section_id)
            .await
            .map_err(storage_error)
    }

    pub async fn update_field(
        &self,
        tenant: Uuid,
        field_id: i64,
        draft: FieldDraft,
    ) -> Result<FieldDefinition, ConfigError> {
        let existing = self.require_field(tenant, field_id).await?;
        if draft.section_id != existing.section_id {
            return Err(ConfigError::Validation {
                message: "a field cannot move to another section".to_string(),
            });
        }
        let section = self.require_section(tenant, existing.section_id).await?;

        let mut field = assemble_field(tenant, &section, &draft, Some(&existing))?;
        field.id = existing.id;

        let siblings = self
            .schema
            .list_fields(tenant, section.id)
            .await
            .map_err(storage_error)?;
        if siblings
            .iter()
            .any(|f| f.id != field_id && f.key == field.key)
        {
            return Err(duplicate_key(&field.key));
        }

        self.schema
            .update_field(&field)
            .await
            .map_err(storage_error)
    }

    pub async fn delete_field(&self, tenant: Uuid, field_id: i64) -> Result<(), ConfigError> {
        self.require_field(tenant, field_id).await?;
        self.schema
            .delete_field(tenant, field_id)
            .await
            .map_err(storage_error)?;
        tracing::info!(tenant = %tenant, field_id, "field deleted");
        Ok(())
    }

    // ===== Activations =====

    pub async fn list_activations(
        &self,
        tenant: Uuid,
        module_id: i64,
    ) -> Result<Vec<ActivationDetails>, ConfigError> {
        self.require_module(module_id).await?;
        let rows = self
            .activations
            .list_for_module(tenant, module_id)
            .await
            .map_err(storage_error)?;

        let ids: Vec<i64> = rows.iter().map(|a| a.id).collect();
        let mut selections: HashMap<i64, Vec<i64>> = HashMap::new();
        for (activation_id, field_id) in self
            .activations
            .selections_for(&ids)
            .await
            .map_err(storage_error)?
        {
            selections.entry(activation_id).or_default().push(field_id);
        }

        let countries = self.label_map(ScopeDimension::Country).await?;
        let property_types = self.label_map(ScopeDimension::PropertyType).await?;
        let premises_types = self.label_map(ScopeDimension::PremisesType).await?;
        let areas = self.label_map(ScopeDimension::Area).await?;
        let statuses: HashMap<i64, String> = self
            .catalog
            .list_statuses()
            .await
            .map_err(storage_error)?
            .into_iter()
            .map(|s| (s.id, s.label))
            .collect();

        let lookup = |map: &HashMap<i64, String>, id: Option<i64>| {
            id.and_then(|id| map.get(&id).cloned())
        };

        Ok(rows
            .into_iter()
            .map(|activation| {
                let selected_field_ids = selections.remove(&activation.id).unwrap_or_default();
                ActivationDetails {
                    country: lookup(&countries, activation.scope.country_id),
                    property_type: lookup(&property_types, activation.scope.property_type_id),
                    premises_type: lookup(&premises_types, activation.scope.premises_type_id),
                    area: lookup(&areas, activation.scope.area_id),
                    status: lookup(&statuses, activation.status_id),
                    selected_field_ids,
                    activation,
                }
            })
            .collect())
    }

    pub async fn create_activation(
        &self,
        tenant: Uuid,
        draft: ActivationDraft,
    ) -> Result<Activation, ConfigError> {
        let module = self.require_active_module(draft.module_id).await?;
        self.validate_scope(&draft.scope).await?;
        self.validate_status(draft.status_id).await?;
        let field_ids = self
            .validate_selection(tenant, module.id, &draft.selected_field_ids)
            .await?;

        // Pre-check for a duplicate scope; the unique index closes the
        // remaining race window at commit time.
        let rows = self
            .activations
            .list_for_module(tenant, module.id)
            .await
            .map_err(storage_error)?;
        if rows.iter().any(|a| a.scope == draft.scope) {
            return Err(duplicate_scope());
        }

        let activation = Activation {
            id: 0,
            tenant_id: tenant,
            module_id: module.id,
            enabled: draft.enabled,
            scope: draft.scope,
            status_id: draft.status_id,
            created_at: Utc::now(),
        };
        let created = self
            .activations
            .create(&activation, &field_ids)
            .await
            .map_err(storage_error)?;
        tracing::info!(tenant = %tenant, module_id = module.id, activation_id = created.id, "activation created");
        Ok(created)
    }

    pub async fn update_activation(
        &self,
        tenant: Uuid,
        activation_id: i64,
        update: ActivationUpdate,
    ) -> Result<Activation, ConfigError> {
        let existing = self
            .activations
            .find(tenant, activation_id)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| not_found("activation", activation_id))?;

        self.validate_scope(&update.scope).await?;
        self.validate_status(update.status_id).await?;
        let field_ids = self
            .validate_selection(tenant, existing.module_id, &update.selected_field_ids)
            .await?;

        let rows = self
            .activations
            .list_for_module(tenant, existing.module_id)
            .await
            .map_err(storage_error)?;
        if rows
            .iter()
            .any(|a| a.id != activation_id && a.scope == update.scope)
        {
            return Err(duplicate_scope());
        }

        let activation = Activation {
            id: existing.id,
            tenant_id: existing.tenant_id,
            module_id: existing.module_id,
            enabled: update.enabled,
            scope: update.scope,
            status_id: update.status_id,
            created_at: existing.created_at,
        };
        self.activations
            .update(&activation, &field_ids)
            .await
            .map_err(storage_error)
    }

    /// Resolve the winning activation for a scope context and return its
    /// field selection. An unknown module or an empty match is not an
    /// error; callers get an empty result.
    pub async fn resolve(
        &self,
        tenant: Uuid,
        module_id: i64,
        ctx: ScopeContext,
    ) -> Result<ResolvedFields, ConfigError> {
        if self
            .catalog
            .find_module(module_id)
            .await
            .map_err(storage_error)?
            .is_none()
        {
            return Ok(ResolvedFields::empty());
        }

        let candidates = self
            .activations
            .list_enabled(tenant, module_id)
            .await
            .map_err(storage_error)?;
        let Some(winner) = resolver::resolve(&candidates, &ctx) else {
            return Ok(ResolvedFields::empty());
        };

        let selected_field_ids = self
            .activations
            .selections_for(&[winner.id])
            .await
            .map_err(storage_error)?
            .into_iter()
            .map(|(_, field_id)| field_id)
            .collect();
        Ok(ResolvedFields {
            activation_id: Some(winner.id),
            selected_field_ids,
        })
    }

    // ===== Shared validation =====

    async fn require_module(&self, module_id: i64) -> Result<Module, ConfigError> {
        self.catalog
            .find_module(module_id)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| not_found("module", module_id))
    }

    async fn require_active_module(&self, module_id: i64) -> Result<Module, ConfigError> {
        let module = self.require_module(module_id).await?;
        if !module.active {
            return Err(ConfigError::Validation {
                message: format!("module '{}' is inactive", module.name),
            });
        }
        Ok(module)
    }

    async fn require_section(
        &self,
        tenant: Uuid,
        section_id: i64,
    ) -> Result<FieldSection, ConfigError> {
        self.schema
            .find_section(tenant, section_id)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| not_found("section", section_id))
    }

    async fn require_field(
        &self,
        tenant: Uuid,
        field_id: i64,
    ) -> Result<FieldDefinition, ConfigError> {
        self.schema
            .find_field(tenant, field_id)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| not_found("field", field_id))
    }

    async fn validate_scope(&self, scope: &ScopeTuple) -> Result<(), ConfigError> {
        let dims = [
            (ScopeDimension::Country, scope.country_id),
            (ScopeDimension::PropertyType, scope.property_type_id),
            (ScopeDimension::PremisesType, scope.premises_type_id),
            (ScopeDimension::Area, scope.area_id),
        ];
        for (dimension, id) in dims {
            if let Some(id) = id {
                let exists = self
                    .catalog
                    .scope_value_exists(dimension, id)
                    .await
                    .map_err(storage_error)?;
                if !exists {
                    return Err(ConfigError::Validation {
                        message: format!("unknown {} id {}", dimension.as_str(), id),
                    });
                }
            }
        }
        Ok(())
    }

    async fn validate_status(&self, status_id: Option<i64>) -> Result<(), ConfigError> {
        if let Some(id) = status_id {
            let exists = self
                .catalog
                .status_exists(id)
                .await
                .map_err(storage_error)?;
            if !exists {
                return Err(ConfigError::Validation {
                    message: format!("unknown status id {}", id),
                });
            }
        }
        Ok(())
    }

    /// Ensure every selected field belongs to the module; returns the ids
    /// deduplicated with their order preserved.
    async fn validate_selection(
        &self,
        tenant: Uuid,
        module_id: i64,
        selected: &[i64],
    ) -> Result<Vec<i64>, ConfigError> {
        if selected.is_empty() {
            return Ok(Vec::new());
        }
        let known: HashSet<i64> = self
            .schema
            .list_module_fields(tenant, module_id)
            .await
            .map_err(storage_error)?
            .into_iter()
            .map(|f| f.id)
            .collect();

        let mut seen = HashSet::new();
        let mut ids = Vec::with_capacity(selected.len());
        for &field_id in selected {
            if !known.contains(&field_id) {
                return Err(ConfigError::Validation {
                    message: format!("field {} does not belong to module {}", field_id, module_id),
                });
            }
            if seen.insert(field_id) {
                ids.push(field_id);
            }
        }
        Ok(ids)
    }

    async fn label_map(
        &self,
        dimension: ScopeDimension,
    ) -> Result<HashMap<i64, String>, ConfigError> {
        Ok(self
            .catalog
            .scope_values(dimension)
            .await
            .map_err(storage_error)?
            .into_iter()
            .map(|v| (v.id, v.label))
            .collect())
    }
}

/// Build a persistable field from a draft.
///
/// When `existing` is given (update path) the key keeps tracking the label
/// only while it still equals the label's derived form; a customized key
/// sticks until the caller overrides it explicitly.
fn assemble_field(
    tenant: Uuid,
    section: &FieldSection,
    draft: &FieldDraft,
    existing: Option<&FieldDefinition>,
) -> Result<FieldDefinition, ConfigError> {
    let label = draft.label.trim().to_string();
    if label.is_empty() {
        return Err(ConfigError::Validation {
            message: "field label cannot be empty".to_string(),
        });
    }

    let explicit = draft
        .key
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty());
    let key = match (explicit, existing) {
        (Some(key), _) => key.to_string(),
        (None, None) => slug::slugify(&label),
        (None, Some(existing)) => {
            if existing.key == slug::slugify(&existing.label) {
                slug::slugify(&label)
            } else {
                existing.key.clone()
            }
        }
    };
    if key.is_empty() {
        return Err(ConfigError::Validation {
            message: format!("cannot derive a key from label '{}'", label),
        });
    }

    Ok(FieldDefinition {
        id: 0,
        tenant_id: tenant,
        module_id: section.module_id,
        section_id: section.id,
        key,
        label,
        field_type: draft.field_type,
        placeholder: draft.placeholder.clone(),
        required: draft.required,
        active: draft.active,
        sort_order: draft.sort_order,
        options: assemble_options(draft.field_type, &draft.options)?,
    })
}

/// Options are kept only for choice types; blank labels are dropped and
/// list order becomes the stored sort order.
fn assemble_options(
    field_type: FieldType,
    drafts: &[OptionDraft],
) -> Result<Vec<FieldOption>, ConfigError> {
    if !field_type.has_options() {
        return Ok(Vec::new());
    }
    let mut options = Vec::with_capacity(drafts.len());
    for draft in drafts {
        let label = draft.label.trim().to_string();
        if label.is_empty() {
            continue;
        }
        let value = match draft.value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            Some(value) => value.to_string(),
            None => slug::slugify(&label),
        };
        if value.is_empty() {
            return Err(ConfigError::Validation {
                message: format!("cannot derive a value for option '{}'", label),
            });
        }
        options.push(FieldOption {
            id: 0,
            field_id: 0,
            label,
            value,
            sort_order: options.len() as i32,
        });
    }
    Ok(options)
}

fn not_found(resource: &str, id: i64) -> ConfigError {
    ConfigError::NotFound {
        resource: resource.to_string(),
        id: id.to_string(),
    }
}

fn duplicate_key(key: &str) -> ConfigError {
    ConfigError::Conflict {
        reason: format!("field key '{}' already exists in this section", key),
    }
}

fn duplicate_scope() -> ConfigError {
    ConfigError::Conflict {
        reason: "an activation for this scope already exists".to_string(),
    }
}

/// Recover a typed error smuggled through `anyhow`, or log and degrade to
/// an internal error.
fn storage_error(err: anyhow::Error) -> ConfigError {
    match err.downcast::<ConfigError>() {
        Ok(typed) => typed,
        Err(err) => {
            tracing::error!(error = ?err, "storage operation failed");
            ConfigError::Internal
        }
    }
}
