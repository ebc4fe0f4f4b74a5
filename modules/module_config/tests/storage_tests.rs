//! Storage tests over in-memory SQLite
//!
//! These run the real migrations and SeaORM repositories behind the
//! service, covering what the in-memory mocks cannot: seeded catalogs,
//! the partial-scope unique index, transactional rollback and
//! cascading deletes.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

use module_config::contract::{
    Activation, ActivationDraft, ActivationUpdate, ConfigError, FieldDefinition, FieldDraft,
    FieldType, OptionDraft, ScopeContext, ScopeTuple, SectionDraft,
};
use module_config::domain::repository::{ActivationRepository, SchemaRepository};
use module_config::domain::ConfigService;
use module_config::infra::storage::{
    Migrator, SeaOrmActivationRepository, SeaOrmCatalogRepository, SeaOrmSchemaRepository,
};
use module_config::Config;

mod common;
use common::{print_test_header, TestTenants, PREMISES_MODULE};

struct Harness {
    service: Arc<ConfigService>,
    schema: Arc<SeaOrmSchemaRepository>,
    activations: Arc<SeaOrmActivationRepository>,
}

/// Migrated in-memory database with the real repositories wired in.
/// A single pooled connection keeps every query on the same database.
async fn harness() -> Harness {
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory sqlite");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let db = Arc::new(db);
    let catalog = Arc::new(SeaOrmCatalogRepository::new(db.clone()));
    let schema = Arc::new(SeaOrmSchemaRepository::new(db.clone()));
    let activations = Arc::new(SeaOrmActivationRepository::new(db));
    let service = Arc::new(ConfigService::new(
        catalog,
        schema.clone(),
        activations.clone(),
        Config::default(),
    ));
    Harness {
        service,
        schema,
        activations,
    }
}

fn wildcard() -> ScopeTuple {
    ScopeTuple {
        country_id: None,
        property_type_id: None,
        premises_type_id: None,
        area_id: None,
    }
}

fn country_scope(country_id: i64) -> ScopeTuple {
    ScopeTuple {
        country_id: Some(country_id),
        ..wildcard()
    }
}

fn activation_row(tenant: Uuid, scope: ScopeTuple) -> Activation {
    Activation {
        id: 0,
        tenant_id: tenant,
        module_id: PREMISES_MODULE,
        enabled: true,
        scope,
        status_id: None,
        created_at: Utc::now(),
    }
}

fn field_row(tenant: Uuid, section_id: i64, key: &str, label: &str) -> FieldDefinition {
    FieldDefinition {
        id: 0,
        tenant_id: tenant,
        module_id: PREMISES_MODULE,
        section_id,
        key: key.to_string(),
        label: label.to_string(),
        field_type: FieldType::Text,
        placeholder: None,
        required: false,
        active: true,
        sort_order: 0,
        options: Vec::new(),
    }
}

#[tokio::test]
async fn test_seeded_catalogs_are_visible() {
    let h = harness().await;

    print_test_header(
        "test_seeded_catalogs_are_visible",
        &["Migrations seed the module and scope catalogs."],
    );

    let modules = h.service.list_modules().await.expect("Failed to list modules");
    assert_eq!(modules.len(), 2);
    assert_eq!(modules[0].name, "Premises");
    assert!(modules.iter().all(|m| m.active));

    let catalog = h
        .service
        .scope_catalog()
        .await
        .expect("Failed to load scope catalog");
    assert_eq!(catalog.countries.len(), 5);
    assert_eq!(catalog.property_types.len(), 4);
    assert_eq!(catalog.premises_types.len(), 5);
    assert_eq!(catalog.areas.len(), 5);
    // Values come back sorted by label
    assert_eq!(catalog.countries[0].label, "France");

    let statuses = h
        .service
        .list_statuses()
        .await
        .expect("Failed to list statuses");
    let labels: Vec<&str> = statuses.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["Active", "Inactive", "Archived"]);
}

#[tokio::test]
async fn test_field_schema_round_trip() {
    let h = harness().await;
    let tenants = TestTenants::new();

    print_test_header(
        "test_field_schema_round_trip",
        &[
            "Sections, fields and options survive a write/read cycle",
            "through real tables, with option values derived from labels.",
        ],
    );

    println!("\n📝 Stage 1: Create a section and a dropdown field");
    let section = h
        .service
        .create_section(
            tenants.acme,
            SectionDraft {
                module_id: PREMISES_MODULE,
                name: "Compliance".to_string(),
                sort_order: 1,
            },
        )
        .await
        .expect("Failed to create section");
    assert!(section.id > 0);

    let field = h
        .service
        .create_field(
            tenants.acme,
            FieldDraft {
                section_id: section.id,
                label: "EPC Rating".to_string(),
                key: None,
                field_type: FieldType::Dropdown,
                placeholder: Some("Select a band".to_string()),
                required: true,
                active: true,
                sort_order: 0,
                options: vec![
                    OptionDraft {
                        label: "Band A".to_string(),
                        value: None,
                    },
                    OptionDraft {
                        label: "Band B".to_string(),
                        value: Some("B".to_string()),
                    },
                ],
            },
        )
        .await
        .expect("Failed to create field");

    println!("\n📝 Stage 2: Read it back");
    let loaded = h
        .service
        .get_field(tenants.acme, field.id)
        .await
        .expect("Failed to load field");
    assert_eq!(loaded.key, "epc_rating");
    assert_eq!(loaded.field_type, FieldType::Dropdown);
    assert_eq!(loaded.placeholder.as_deref(), Some("Select a band"));
    assert_eq!(loaded.options.len(), 2);
    assert_eq!(loaded.options[0].value, "band_a");
    assert_eq!(loaded.options[1].value, "B");
    assert_eq!(loaded.options[1].sort_order, 1);

    println!("\n📝 Stage 3: Replace the options on update");
    let updated = h
        .service
        .update_field(
            tenants.acme,
            field.id,
            FieldDraft {
                section_id: section.id,
                label: "EPC Band".to_string(),
                key: None,
                field_type: FieldType::Dropdown,
                placeholder: None,
                required: true,
                active: true,
                sort_order: 0,
                options: vec![OptionDraft {
                    label: "Band C".to_string(),
                    value: None,
                }],
            },
        )
        .await
        .expect("Failed to update field");
    // The key was never customized, so it follows the label
    assert_eq!(updated.key, "epc_band");
    assert_eq!(updated.options.len(), 1);
    assert_eq!(updated.options[0].value, "band_c");

    println!("\n📝 Stage 4: Delete and confirm it is gone");
    h.service
        .delete_field(tenants.acme, field.id)
        .await
        .expect("Failed to delete field");
    let missing = h.service.get_field(tenants.acme, field.id).await;
    assert!(matches!(missing, Err(ConfigError::NotFound { .. })));
}

#[tokio::test]
async fn test_scope_index_closes_the_race() {
    let h = harness().await;
    let tenants = TestTenants::new();

    print_test_header(
        "test_scope_index_closes_the_race",
        &[
            "Two writers may both pass the service pre-check; the",
            "COALESCE unique index rejects the second insert, wildcard",
            "columns included.",
        ],
    );

    println!("\n📝 Stage 1: All-wildcard tuple");
    h.activations
        .create(&activation_row(tenants.acme, wildcard()), &[])
        .await
        .expect("First wildcard row should insert");
    let second = h
        .activations
        .create(&activation_row(tenants.acme, wildcard()), &[])
        .await;
    let err = second.expect_err("Second wildcard row must hit the index");
    assert!(matches!(
        err.downcast::<ConfigError>(),
        Ok(ConfigError::Conflict { .. })
    ));

    println!("\n📝 Stage 2: Partial tuple");
    h.activations
        .create(&activation_row(tenants.acme, country_scope(1)), &[])
        .await
        .expect("First country row should insert");
    let second = h
        .activations
        .create(&activation_row(tenants.acme, country_scope(1)), &[])
        .await;
    assert!(second.is_err());

    println!("\n📝 Stage 3: Another tenant reuses the tuple freely");
    h.activations
        .create(&activation_row(tenants.globex, wildcard()), &[])
        .await
        .expect("Same tuple under another tenant should insert");
}

#[tokio::test]
async fn test_batch_insert_rolls_back_as_a_unit() {
    let h = harness().await;
    let tenants = TestTenants::new();

    print_test_header(
        "test_batch_insert_rolls_back_as_a_unit",
        &[
            "A key collision mid-batch aborts the transaction and",
            "leaves no partial rows behind.",
        ],
    );

    let section = h
        .service
        .create_section(
            tenants.acme,
            SectionDraft {
                module_id: PREMISES_MODULE,
                name: "General".to_string(),
                sort_order: 0,
            },
        )
        .await
        .expect("Failed to create section");

    // Both rows carry the same key, so the second insert violates the
    // per-section key index after the first has already landed
    let batch = vec![
        field_row(tenants.acme, section.id, "roof_type", "Roof Type"),
        field_row(tenants.acme, section.id, "roof_type", "Roof Type Again"),
    ];
    let result = h.schema.create_fields(&batch).await;
    assert!(result.is_err());

    let remaining = h
        .service
        .list_fields(tenants.acme, section.id)
        .await
        .expect("Failed to list fields");
    assert!(remaining.is_empty());
}

#[tokio::test]
async fn test_delete_section_cascades() {
    let h = harness().await;
    let tenants = TestTenants::new();

    print_test_header(
        "test_delete_section_cascades",
        &[
            "Deleting a section removes its fields, their options and",
            "any activation selections, but keeps the activation rows.",
        ],
    );

    let section = h
        .service
        .create_section(
            tenants.acme,
            SectionDraft {
                module_id: PREMISES_MODULE,
                name: "Doomed".to_string(),
                sort_order: 0,
            },
        )
        .await
        .expect("Failed to create section");
    let field = h
        .service
        .create_field(
            tenants.acme,
            FieldDraft {
                section_id: section.id,
                label: "Heating Type".to_string(),
                key: None,
                field_type: FieldType::Radio,
                placeholder: None,
                required: false,
                active: true,
                sort_order: 0,
                options: vec![OptionDraft {
                    label: "Gas".to_string(),
                    value: None,
                }],
            },
        )
        .await
        .expect("Failed to create field");

    h.service
        .create_activation(
            tenants.acme,
            ActivationDraft {
                module_id: PREMISES_MODULE,
                enabled: true,
                scope: wildcard(),
                status_id: Some(1),
                selected_field_ids: vec![field.id],
            },
        )
        .await
        .expect("Failed to create activation");

    h.service
        .delete_section(tenants.acme, section.id)
        .await
        .expect("Failed to delete section");

    let sections = h
        .service
        .list_sections(tenants.acme, PREMISES_MODULE)
        .await
        .expect("Failed to list sections");
    assert!(sections.is_empty());

    let listed = h
        .service
        .list_activations(tenants.acme, PREMISES_MODULE)
        .await
        .expect("Failed to list activations");
    assert_eq!(listed.len(), 1);
    assert!(listed[0].selected_field_ids.is_empty());
}

#[tokio::test]
async fn test_activation_update_round_trip() {
    let h = harness().await;
    let tenants = TestTenants::new();

    print_test_header(
        "test_activation_update_round_trip",
        &[
            "An update replaces scope, status and selection in place",
            "while the creation timestamp stays put.",
        ],
    );

    let section = h
        .service
        .create_section(
            tenants.acme,
            SectionDraft {
                module_id: PREMISES_MODULE,
                name: "General".to_string(),
                sort_order: 0,
            },
        )
        .await
        .expect("Failed to create section");
    let first = h
        .service
        .create_field(
            tenants.acme,
            FieldDraft {
                section_id: section.id,
                label: "Floor Count".to_string(),
                key: None,
                field_type: FieldType::Number,
                placeholder: None,
                required: false,
                active: true,
                sort_order: 0,
                options: Vec::new(),
            },
        )
        .await
        .expect("Failed to create field");
    let second = h
        .service
        .create_field(
            tenants.acme,
            FieldDraft {
                section_id: section.id,
                label: "Fire Cert".to_string(),
                key: None,
                field_type: FieldType::Text,
                placeholder: None,
                required: false,
                active: true,
                sort_order: 1,
                options: Vec::new(),
            },
        )
        .await
        .expect("Failed to create field");

    let activation = h
        .service
        .create_activation(
            tenants.acme,
            ActivationDraft {
                module_id: PREMISES_MODULE,
                enabled: true,
                scope: country_scope(1),
                status_id: Some(1),
                selected_field_ids: vec![first.id],
            },
        )
        .await
        .expect("Failed to create activation");

    let before = h
        .service
        .list_activations(tenants.acme, PREMISES_MODULE)
        .await
        .expect("Failed to list activations");

    h.service
        .update_activation(
            tenants.acme,
            activation.id,
            ActivationUpdate {
                enabled: false,
                scope: country_scope(2),
                status_id: Some(3),
                selected_field_ids: vec![second.id],
            },
        )
        .await
        .expect("Failed to update activation");

    let after = h
        .service
        .list_activations(tenants.acme, PREMISES_MODULE)
        .await
        .expect("Failed to list activations");
    assert_eq!(after.len(), 1);
    let row = &after[0].activation;
    assert!(!row.enabled);
    assert_eq!(row.scope.country_id, Some(2));
    assert_eq!(row.created_at, before[0].activation.created_at);
    assert_eq!(after[0].country.as_deref(), Some("Ireland"));
    assert_eq!(after[0].status.as_deref(), Some("Archived"));
    assert_eq!(after[0].selected_field_ids, vec![second.id]);
}

#[tokio::test]
async fn test_resolution_end_to_end() {
    let h = harness().await;
    let tenants = TestTenants::new();

    print_test_header(
        "test_resolution_end_to_end",
        &[
            "Layered activations in real tables resolve to the most",
            "specific enabled row for a render context.",
        ],
    );

    let section = h
        .service
        .create_section(
            tenants.acme,
            SectionDraft {
                module_id: PREMISES_MODULE,
                name: "General".to_string(),
                sort_order: 0,
            },
        )
        .await
        .expect("Failed to create section");
    let mut field_ids = Vec::new();
    for (label, sort_order) in [("Base", 0), ("UK Extra", 1), ("UK Office Extra", 2)] {
        let field = h
            .service
            .create_field(
                tenants.acme,
                FieldDraft {
                    section_id: section.id,
                    label: label.to_string(),
                    key: None,
                    field_type: FieldType::Text,
                    placeholder: None,
                    required: false,
                    active: true,
                    sort_order,
                    options: Vec::new(),
                },
            )
            .await
            .expect("Failed to create field");
        field_ids.push(field.id);
    }

    h.service
        .create_activation(
            tenants.acme,
            ActivationDraft {
                module_id: PREMISES_MODULE,
                enabled: true,
                scope: wildcard(),
                status_id: None,
                selected_field_ids: vec![field_ids[0]],
            },
        )
        .await
        .expect("Failed to create wildcard row");
    h.service
        .create_activation(
            tenants.acme,
            ActivationDraft {
                module_id: PREMISES_MODULE,
                enabled: true,
                scope: country_scope(1),
                status_id: None,
                selected_field_ids: vec![field_ids[0], field_ids[1]],
            },
        )
        .await
        .expect("Failed to create country row");
    let deep = h
        .service
        .create_activation(
            tenants.acme,
            ActivationDraft {
                module_id: PREMISES_MODULE,
                enabled: true,
                scope: ScopeTuple {
                    country_id: Some(1),
                    premises_type_id: Some(1),
                    ..wildcard()
                },
                status_id: None,
                selected_field_ids: vec![field_ids[0], field_ids[1], field_ids[2]],
            },
        )
        .await
        .expect("Failed to create country+premises row");

    let resolved = h
        .service
        .resolve(
            tenants.acme,
            PREMISES_MODULE,
            ScopeContext {
                country_id: Some(1),
                property_type_id: Some(2),
                premises_type_id: Some(1),
                area_id: None,
            },
        )
        .await
        .expect("Failed to resolve");
    assert_eq!(resolved.activation_id, Some(deep.id));
    assert_eq!(resolved.selected_field_ids, field_ids);

    // Nothing leaks across tenants
    let foreign = h
        .service
        .resolve(
            tenants.globex,
            PREMISES_MODULE,
            ScopeContext {
                country_id: Some(1),
                property_type_id: None,
                premises_type_id: None,
                area_id: None,
            },
        )
        .await
        .expect("Failed to resolve for other tenant");
    assert_eq!(foreign.activation_id, None);
}
