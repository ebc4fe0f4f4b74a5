//! Shared fixtures and in-memory repositories for module_config tests

// Each test binary uses its own subset of these helpers
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use module_config::contract::{
    Activation, FieldDefinition, FieldSection, Module, ScopeDimension, ScopeValue, Status,
};
use module_config::domain::repository::{
    ActivationRepository, CatalogRepository, SchemaRepository,
};
use module_config::domain::ConfigService;
use module_config::{Config, ConfigError};

pub fn print_test_header(test_name: &str, purpose: &[&str]) {
    println!("\n🧪 TEST: {}", test_name);
    if let Some(first) = purpose.first() {
        println!("📋 PURPOSE: {}", first);
    }
    for line in purpose.iter().skip(1) {
        println!("   {}", line);
    }
}

/// Two unrelated tenants for isolation checks
#[derive(Debug, Clone)]
pub struct TestTenants {
    pub acme: Uuid,
    pub globex: Uuid,
}

impl TestTenants {
    pub fn new() -> Self {
        Self {
            acme: Uuid::new_v4(),
            globex: Uuid::new_v4(),
        }
    }

    pub fn print_structure(&self) {
        println!("\n📊 Test Tenants:");
        println!("   Acme Facilities: {}", self.acme);
        println!("   Globex Estates:  {}", self.globex);
    }
}

impl Default for TestTenants {
    fn default() -> Self {
        Self::new()
    }
}

/// Seeded module ids used across the tests
pub const PREMISES_MODULE: i64 = 1;
pub const VEHICLES_MODULE: i64 = 2;
pub const LEGACY_MODULE: i64 = 3;

// Mock repository implementations for testing
pub mod mocks {
    use super::*;

    /// Fixed catalogs mirroring the seeded platform data, plus one
    /// inactive module the seeds do not have
    pub struct MockCatalogRepo {
        modules: Vec<Module>,
        countries: Vec<ScopeValue>,
        property_types: Vec<ScopeValue>,
        premises_types: Vec<ScopeValue>,
        areas: Vec<ScopeValue>,
        statuses: Vec<Status>,
    }

    fn values(entries: &[(i64, &str)]) -> Vec<ScopeValue> {
        entries
            .iter()
            .map(|(id, label)| ScopeValue {
                id: *id,
                label: label.to_string(),
            })
            .collect()
    }

    impl MockCatalogRepo {
        pub fn new() -> Self {
            Self {
                modules: vec![
                    Module {
                        id: PREMISES_MODULE,
                        name: "Premises".to_string(),
                        active: true,
                    },
                    Module {
                        id: VEHICLES_MODULE,
                        name: "Vehicles".to_string(),
                        active: true,
                    },
                    Module {
                        id: LEGACY_MODULE,
                        name: "Legacy Assets".to_string(),
                        active: false,
                    },
                ],
                countries: values(&[(1, "United Kingdom"), (2, "Ireland"), (3, "United States")]),
                property_types: values(&[(1, "Commercial"), (2, "Residential")]),
                premises_types: values(&[(1, "Office"), (2, "Warehouse"), (3, "Retail Unit")]),
                areas: values(&[(1, "North"), (2, "South"), (3, "East"), (4, "West")]),
                statuses: vec![
                    Status {
                        id: 1,
                        label: "Active".to_string(),
                    },
                    Status {
                        id: 2,
                        label: "Archived".to_string(),
                    },
                ],
            }
        }

        fn dimension(&self, dimension: ScopeDimension) -> &[ScopeValue] {
            match dimension {
                ScopeDimension::Country => &self.countries,
                ScopeDimension::PropertyType => &self.property_types,
                ScopeDimension::PremisesType => &self.premises_types,
                ScopeDimension::Area => &self.areas,
            }
        }
    }

    #[async_trait]
    impl CatalogRepository for MockCatalogRepo {
        async fn list_modules(&self) -> anyhow::Result<Vec<Module>> {
            Ok(self.modules.clone())
        }

        async fn find_module(&self, module_id: i64) -> anyhow::Result<Option<Module>> {
            Ok(self.modules.iter().find(|m| m.id == module_id).cloned())
        }

        async fn scope_values(
            &self,
            dimension: ScopeDimension,
        ) -> anyhow::Result<Vec<ScopeValue>> {
            Ok(self.dimension(dimension).to_vec())
        }

        async fn scope_value_exists(
            &self,
            dimension: ScopeDimension,
            id: i64,
        ) -> anyhow::Result<bool> {
            Ok(self.dimension(dimension).iter().any(|v| v.id == id))
        }

        async fn list_statuses(&self) -> anyhow::Result<Vec<Status>> {
            Ok(self.statuses.clone())
        }

        async fn status_exists(&self, status_id: i64) -> anyhow::Result<bool> {
            Ok(self.statuses.iter().any(|s| s.id == status_id))
        }
    }

    #[derive(Clone)]
    pub struct MockSchemaRepo {
        sections: Arc<RwLock<HashMap<i64, FieldSection>>>,
        fields: Arc<RwLock<HashMap<i64, FieldDefinition>>>,
        next_id: Arc<RwLock<i64>>,
    }

    impl MockSchemaRepo {
        pub fn new() -> Self {
            Self {
                sections: Arc::new(RwLock::new(HashMap::new())),
                fields: Arc::new(RwLock::new(HashMap::new())),
                next_id: Arc::new(RwLock::new(0)),
            }
        }

        fn next_id(&self) -> i64 {
            let mut id = self.next_id.write();
            *id += 1;
            *id
        }

        pub fn section_count(&self) -> usize {
            self.sections.read().len()
        }

        pub fn field_count(&self) -> usize {
            self.fields.read().len()
        }

        pub fn print_state(&self, context: &str) {
            let sections = self.sections.read();
            let fields = self.fields.read();
            println!("\n========== Schema State: {} ==========", context);
            println!("Sections: {}, fields: {}", sections.len(), fields.len());
            for section in sections.values() {
                println!("  Section {}: {}", section.id, section.name);
                for field in fields.values().filter(|f| f.section_id == section.id) {
                    println!(
                        "    Field {}: key={} type={} options={}",
                        field.id,
                        field.key,
                        field.field_type,
                        field.options.len()
                    );
                }
            }
            println!("=========================================\n");
        }
    }

    #[async_trait]
    impl SchemaRepository for MockSchemaRepo {
        async fn create_section(&self, section: &FieldSection) -> anyhow::Result<FieldSection> {
            let mut created = section.clone();
            created.id = self.next_id();
            self.sections.write().insert(created.id, created.clone());
            Ok(created)
        }

        async fn find_section(
            &self,
            tenant: Uuid,
            section_id: i64,
        ) -> anyhow::Result<Option<FieldSection>> {
            Ok(self
                .sections
                .read()
                .get(&section_id)
                .filter(|s| s.tenant_id == tenant)
                .cloned())
        }

        async fn list_sections(
            &self,
            tenant: Uuid,
            module_id: i64,
        ) -> anyhow::Result<Vec<FieldSection>> {
            let mut sections: Vec<FieldSection> = self
                .sections
                .read()
                .values()
                .filter(|s| s.tenant_id == tenant && s.module_id == module_id)
                .cloned()
                .collect();
            sections.sort_by_key(|s| (s.sort_order, s.id));
            Ok(sections)
        }

        async fn update_section(&self, section: &FieldSection) -> anyhow::Result<FieldSection> {
            self.sections.write().insert(section.id, section.clone());
            Ok(section.clone())
        }

        async fn delete_section(&self, _tenant: Uuid, section_id: i64) -> anyhow::Result<()> {
            self.sections.write().remove(&section_id);
            self.fields.write().retain(|_, f| f.section_id != section_id);
            Ok(())
        }

        async fn create_field(&self, field: &FieldDefinition) -> anyhow::Result<FieldDefinition> {
            let mut created = field.clone();
            created.id = self.next_id();
            for option in created.options.iter_mut() {
                option.id = self.next_id();
                option.field_id = created.id;
            }
            self.fields.write().insert(created.id, created.clone());
            Ok(created)
        }

        async fn create_fields(
            &self,
            fields: &[FieldDefinition],
        ) -> anyhow::Result<Vec<FieldDefinition>> {
            let mut created = Vec::with_capacity(fields.len());
            for field in fields {
                created.push(self.create_field(field).await?);
            }
            Ok(created)
        }

        async fn find_field(
            &self,
            tenant: Uuid,
            field_id: i64,
        ) -> anyhow::Result<Option<FieldDefinition>> {
            Ok(self
                .fields
                .read()
                .get(&field_id)
                .filter(|f| f.tenant_id == tenant)
                .cloned())
        }

        async fn list_fields(
            &self,
            tenant: Uuid,
            section_id: i64,
        ) -> anyhow::Result<Vec<FieldDefinition>> {
            let mut fields: Vec<FieldDefinition> = self
                .fields
                .read()
                .values()
                .filter(|f| f.tenant_id == tenant && f.section_id == section_id)
                .cloned()
                .collect();
            fields.sort_by_key(|f| (f.sort_order, f.id));
            Ok(fields)
        }

        async fn list_module_fields(
            &self,
            tenant: Uuid,
            module_id: i64,
        ) -> anyhow::Result<Vec<FieldDefinition>> {
            let mut fields: Vec<FieldDefinition> = self
                .fields
                .read()
                .values()
                .filter(|f| f.tenant_id == tenant && f.module_id == module_id)
                .cloned()
                .collect();
            fields.sort_by_key(|f| (f.section_id, f.sort_order, f.id));
            Ok(fields)
        }

        async fn update_field(&self, field: &FieldDefinition) -> anyhow::Result<FieldDefinition> {
            let mut updated = field.clone();
            for option in updated.options.iter_mut() {
                if option.id == 0 {
                    option.id = self.next_id();
                }
                option.field_id = updated.id;
            }
            self.fields.write().insert(updated.id, updated.clone());
            Ok(updated)
        }

        async fn delete_field(&self, _tenant: Uuid, field_id: i64) -> anyhow::Result<()> {
            self.fields.write().remove(&field_id);
            Ok(())
        }
    }

    #[derive(Clone)]
    pub struct MockActivationRepo {
        rows: Arc<RwLock<HashMap<i64, Activation>>>,
        selections: Arc<RwLock<HashMap<i64, Vec<i64>>>>,
        next_id: Arc<RwLock<i64>>,
    }

    impl MockActivationRepo {
        pub fn new() -> Self {
            Self {
                rows: Arc::new(RwLock::new(HashMap::new())),
                selections: Arc::new(RwLock::new(HashMap::new())),
                next_id: Arc::new(RwLock::new(0)),
            }
        }

        fn next_id(&self) -> i64 {
            let mut id = self.next_id.write();
            *id += 1;
            *id
        }

        pub fn row_count(&self) -> usize {
            self.rows.read().len()
        }

        /// Mirrors the unique scope index of the real schema
        fn scope_taken(&self, activation: &Activation, exclude_id: Option<i64>) -> bool {
            self.rows.read().values().any(|row| {
                Some(row.id) != exclude_id
                    && row.tenant_id == activation.tenant_id
                    && row.module_id == activation.module_id
                    && row.scope == activation.scope
            })
        }
    }

    #[async_trait]
    impl ActivationRepository for MockActivationRepo {
        async fn create(
            &self,
            activation: &Activation,
            field_ids: &[i64],
        ) -> anyhow::Result<Activation> {
            if self.scope_taken(activation, None) {
                return Err(anyhow::Error::new(ConfigError::Conflict {
                    reason: "an activation for this scope already exists".to_string(),
                }));
            }
            let mut created = activation.clone();
            created.id = self.next_id();
            self.rows.write().insert(created.id, created.clone());
            self.selections.write().insert(created.id, field_ids.to_vec());
            Ok(created)
        }

        async fn update(
            &self,
            activation: &Activation,
            field_ids: &[i64],
        ) -> anyhow::Result<Activation> {
            if self.scope_taken(activation, Some(activation.id)) {
                return Err(anyhow::Error::new(ConfigError::Conflict {
                    reason: "an activation for this scope already exists".to_string(),
                }));
            }
            self.rows.write().insert(activation.id, activation.clone());
            self.selections
                .write()
                .insert(activation.id, field_ids.to_vec());
            Ok(activation.clone())
        }

        async fn find(
            &self,
            tenant: Uuid,
            activation_id: i64,
        ) -> anyhow::Result<Option<Activation>> {
            Ok(self
                .rows
                .read()
                .get(&activation_id)
                .filter(|a| a.tenant_id == tenant)
                .cloned())
        }

        async fn list_for_module(
            &self,
            tenant: Uuid,
            module_id: i64,
        ) -> anyhow::Result<Vec<Activation>> {
            let mut rows: Vec<Activation> = self
                .rows
                .read()
                .values()
                .filter(|a| a.tenant_id == tenant && a.module_id == module_id)
                .cloned()
                .collect();
            rows.sort_by_key(|a| std::cmp::Reverse(a.id));
            Ok(rows)
        }

        async fn list_enabled(
            &self,
            tenant: Uuid,
            module_id: i64,
        ) -> anyhow::Result<Vec<Activation>> {
            let mut rows: Vec<Activation> = self
                .rows
                .read()
                .values()
                .filter(|a| a.tenant_id == tenant && a.module_id == module_id && a.enabled)
                .cloned()
                .collect();
            rows.sort_by_key(|a| a.id);
            Ok(rows)
        }

        async fn selections_for(&self, activation_ids: &[i64]) -> anyhow::Result<Vec<(i64, i64)>> {
            let selections = self.selections.read();
            let mut pairs = Vec::new();
            for id in activation_ids {
                if let Some(field_ids) = selections.get(id) {
                    let mut sorted = field_ids.clone();
                    sorted.sort_unstable();
                    pairs.extend(sorted.into_iter().map(|field_id| (*id, field_id)));
                }
            }
            Ok(pairs)
        }
    }
}

/// Service over fresh mocks with the default configuration
pub fn test_service() -> (
    Arc<ConfigService>,
    mocks::MockSchemaRepo,
    mocks::MockActivationRepo,
) {
    test_service_with_config(Config::default())
}

pub fn test_service_with_config(
    config: Config,
) -> (
    Arc<ConfigService>,
    mocks::MockSchemaRepo,
    mocks::MockActivationRepo,
) {
    let schema = mocks::MockSchemaRepo::new();
    let activations = mocks::MockActivationRepo::new();
    let service = ConfigService::new(
        Arc::new(mocks::MockCatalogRepo::new()),
        Arc::new(schema.clone()),
        Arc::new(activations.clone()),
        config,
    );
    (Arc::new(service), schema, activations)
}
