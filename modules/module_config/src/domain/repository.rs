//! Repository ports for the module configuration engine
//!
//! Implementations live in `infra::storage`. All methods return
//! `anyhow::Result`; failures a caller can act on (unique violations) are
//! surfaced as a typed [`ConfigError`](crate::contract::ConfigError) inside
//! the `anyhow` error and recovered by the service via downcast.

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::contract::model::{
    Activation, FieldDefinition, FieldSection, Module, ScopeDimension, ScopeValue, Status,
};

/// Read access to the platform-seeded catalogs.
///
/// Catalogs are global, not tenant-scoped.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_modules(&self) -> Result<Vec<Module>>;

    async fn find_module(&self, module_id: i64) -> Result<Option<Module>>;

    /// Values of one scope dimension, ordered by label
    async fn scope_values(&self, dimension: ScopeDimension) -> Result<Vec<ScopeValue>>;

    async fn scope_value_exists(&self, dimension: ScopeDimension, id: i64) -> Result<bool>;

    async fn list_statuses(&self) -> Result<Vec<Status>>;

    async fn status_exists(&self, status_id: i64) -> Result<bool>;
}

/// Persistence for tenant-defined sections and fields.
#[async_trait]
pub trait SchemaRepository: Send + Sync {
    /// Insert a section and return it with its assigned id
    async fn create_section(&self, section: &FieldSection) -> Result<FieldSection>;

    async fn find_section(&self, tenant: Uuid, section_id: i64) -> Result<Option<FieldSection>>;

    /// Sections of one module, ordered by sort_order then id
    async fn list_sections(&self, tenant: Uuid, module_id: i64) -> Result<Vec<FieldSection>>;

    async fn update_section(&self, section: &FieldSection) -> Result<FieldSection>;

    /// Delete a section together with its fields, their options and any
    /// activation selections referencing those fields
    async fn delete_section(&self, tenant: Uuid, section_id: i64) -> Result<()>;

    /// Insert a field with its options and return it with assigned ids
    async fn create_field(&self, field: &FieldDefinition) -> Result<FieldDefinition>;

    /// Insert several fields in one transaction; either all rows land or none
    async fn create_fields(&self, fields: &[FieldDefinition]) -> Result<Vec<FieldDefinition>>;

    /// Fetch a field with its options
    async fn find_field(&self, tenant: Uuid, field_id: i64) -> Result<Option<FieldDefinition>>;

    /// Fields of one section with options, ordered by sort_order then id
    async fn list_fields(&self, tenant: Uuid, section_id: i64) -> Result<Vec<FieldDefinition>>;

    /// Fields across all sections of a module, with options
    async fn list_module_fields(&self, tenant: Uuid, module_id: i64)
        -> Result<Vec<FieldDefinition>>;

    /// Update a field; the stored option list is replaced wholesale
    async fn update_field(&self, field: &FieldDefinition) -> Result<FieldDefinition>;

    /// Delete a field together with its options and activation selections
    async fn delete_field(&self, tenant: Uuid, field_id: i64) -> Result<()>;
}

/// Persistence for module activations and their field selections.
#[async_trait]
pub trait ActivationRepository: Send + Sync {
    /// Insert an activation and its selection in one transaction.
    ///
    /// A concurrent insert of the same scope tuple surfaces as
    /// `ConfigError::Conflict` inside the returned error.
    async fn create(&self, activation: &Activation, field_ids: &[i64]) -> Result<Activation>;

    /// Update an activation, replacing its selection wholesale
    async fn update(&self, activation: &Activation, field_ids: &[i64]) -> Result<Activation>;

    async fn find(&self, tenant: Uuid, activation_id: i64) -> Result<Option<Activation>>;

    /// All activations of a module for a tenant, newest first
    async fn list_for_module(&self, tenant: Uuid, module_id: i64) -> Result<Vec<Activation>>;

    /// Enabled activations only; the resolver's candidate set
    async fn list_enabled(&self, tenant: Uuid, module_id: i64) -> Result<Vec<Activation>>;

    /// `(activation_id, field_id)` pairs for the given activations
    async fn selections_for(&self, activation_ids: &[i64]) -> Result<Vec<(i64, i64)>>;
}
