//! Premise and vehicle lifecycle tests over in-memory repositories

use std::collections::BTreeMap;

use asset_registry::contract::{PremiseDraft, RegistryError, VehicleDraft};
use asset_registry::Config;

mod common;
use common::{print_test_header, test_service, test_service_with_config, TestTenants};

fn attrs(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn premise_draft(name: &str, attributes: &[(&str, &str)]) -> PremiseDraft {
    PremiseDraft {
        name: name.to_string(),
        address: None,
        country_id: None,
        area_id: None,
        status_id: None,
        attributes: attrs(attributes),
    }
}

fn vehicle_draft(registration_no: &str, attributes: &[(&str, &str)]) -> VehicleDraft {
    VehicleDraft {
        registration_no: registration_no.to_string(),
        label: None,
        country_id: None,
        area_id: None,
        status_id: None,
        attributes: attrs(attributes),
    }
}

#[tokio::test]
async fn test_create_premise_with_attributes() {
    let (service, premises, _) = test_service();
    let tenants = TestTenants::new();

    print_test_header(
        "test_create_premise_with_attributes",
        &["A premise stores its core columns plus an open attribute map."],
    );

    println!("\n📝 Stage 1: Create a premise with two attributes");
    let draft = PremiseDraft {
        address: Some("12 Quay Street".to_string()),
        country_id: Some(1),
        status_id: Some(1),
        ..premise_draft("  Riverside House  ", &[("floors", "3"), ("heating", "gas")])
    };
    let created = service
        .create_premise(tenants.acme, draft)
        .await
        .expect("Failed to create premise");
    assert!(created.id > 0);
    assert_eq!(created.name, "Riverside House");
    assert_eq!(created.attributes.len(), 2);

    println!("\n📝 Stage 2: Read it back with attributes merged in");
    let fetched = service
        .get_premise(tenants.acme, created.id)
        .await
        .expect("Failed to fetch premise");
    assert_eq!(fetched.attributes.get("floors").map(String::as_str), Some("3"));
    assert_eq!(fetched.address.as_deref(), Some("12 Quay Street"));

    println!("\n📝 Stage 3: List shows core columns only");
    let listed = service
        .list_premises(tenants.acme)
        .await
        .expect("Failed to list premises");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Riverside House");
    premises.print_state("after create");
}

#[tokio::test]
async fn test_update_replaces_the_attribute_set() {
    let (service, premises, _) = test_service();
    let tenants = TestTenants::new();

    print_test_header(
        "test_update_replaces_the_attribute_set",
        &[
            "Updates are full replacements.",
            "Attributes omitted from the update are dropped, not kept.",
        ],
    );

    println!("\n📝 Stage 1: Create with floors and listed_building");
    let created = service
        .create_premise(
            tenants.acme,
            premise_draft("Riverside House", &[("floors", "3"), ("listed_building", "true")]),
        )
        .await
        .expect("Failed to create premise");

    println!("\n📝 Stage 2: Update with only an owner attribute");
    let updated = service
        .update_premise(
            tenants.acme,
            created.id,
            PremiseDraft {
                address: Some("12 Quay Street".to_string()),
                ..premise_draft("Riverside House", &[("owner", "Acme Facilities")])
            },
        )
        .await
        .expect("Failed to update premise");
    assert_eq!(updated.attributes.len(), 1);
    assert!(updated.attributes.contains_key("owner"));
    assert!(!updated.attributes.contains_key("floors"));
    assert_eq!(updated.created_at, created.created_at);

    println!("\n📝 Stage 3: Omitting the address on the next update clears it");
    let cleared = service
        .update_premise(
            tenants.acme,
            created.id,
            premise_draft("Riverside House", &[("owner", "Acme Facilities")]),
        )
        .await
        .expect("Failed to update premise");
    assert_eq!(cleared.address, None);
    assert_eq!(premises.row_count(), 1);
}

#[tokio::test]
async fn test_premise_validations() {
    let (service, _, _) = test_service();
    let tenants = TestTenants::new();

    print_test_header(
        "test_premise_validations",
        &["Blank names are a 400 and unknown ids a 404."],
    );

    let blank = service
        .create_premise(tenants.acme, premise_draft("   ", &[]))
        .await;
    assert!(matches!(blank, Err(RegistryError::Validation { .. })));

    let missing = service.get_premise(tenants.acme, 9999).await;
    assert!(matches!(missing, Err(RegistryError::NotFound { .. })));

    let missing_update = service
        .update_premise(tenants.acme, 9999, premise_draft("Riverside House", &[]))
        .await;
    assert!(matches!(missing_update, Err(RegistryError::NotFound { .. })));

    let missing_delete = service.delete_premise(tenants.acme, 9999).await;
    assert!(matches!(missing_delete, Err(RegistryError::NotFound { .. })));
}

#[tokio::test]
async fn test_attribute_cap_and_core_key_stripping() {
    let (service, premises, _) = test_service_with_config(Config { max_attributes: 2 });
    let tenants = TestTenants::new();

    print_test_header(
        "test_attribute_cap_and_core_key_stripping",
        &[
            "Attributes beyond the configured cap are rejected.",
            "Keys that collide with core columns never reach storage.",
        ],
    );

    println!("\n📝 Stage 1: Three attributes against a cap of two");
    let over_cap = service
        .create_premise(
            tenants.acme,
            premise_draft("Riverside House", &[("a", "1"), ("b", "2"), ("c", "3")]),
        )
        .await;
    assert!(matches!(over_cap, Err(RegistryError::Validation { .. })));

    println!("\n📝 Stage 2: Core-named keys are dropped before the cap applies");
    let created = service
        .create_premise(
            tenants.acme,
            premise_draft(
                "Riverside House",
                &[("name", "Spoofed"), ("tenant_id", "x"), ("floors", "3")],
            ),
        )
        .await
        .expect("Failed to create premise");
    assert_eq!(created.attributes.len(), 1);
    let stored = premises
        .stored_attributes(created.id)
        .expect("Premise row missing");
    assert!(!stored.contains_key("name"));
    assert!(stored.contains_key("floors"));

    println!("\n📝 Stage 3: A stale core-named row is hidden on read");
    let mut stale = service
        .get_premise(tenants.acme, created.id)
        .await
        .expect("Failed to fetch premise");
    stale
        .attributes
        .insert("name".to_string(), "Spoofed".to_string());
    premises.plant(stale);
    let fetched = service
        .get_premise(tenants.acme, created.id)
        .await
        .expect("Failed to fetch premise");
    assert!(!fetched.attributes.contains_key("name"));
    assert!(fetched.attributes.contains_key("floors"));
}

#[tokio::test]
async fn test_vehicle_registration_is_unique_per_tenant() {
    let (service, _, vehicles) = test_service();
    let tenants = TestTenants::new();

    print_test_header(
        "test_vehicle_registration_is_unique_per_tenant",
        &[
            "A second vehicle with the same registration is a 409.",
            "Another tenant may reuse the registration number.",
        ],
    );

    println!("\n📝 Stage 1: First registration wins");
    let first = service
        .create_vehicle(tenants.acme, vehicle_draft("LM71 XKB", &[]))
        .await
        .expect("Failed to create vehicle");
    assert!(first.id > 0);

    println!("\n📝 Stage 2: Same tenant, same registration");
    let duplicate = service
        .create_vehicle(tenants.acme, vehicle_draft("LM71 XKB", &[]))
        .await;
    assert!(matches!(duplicate, Err(RegistryError::Conflict { .. })));
    assert_eq!(vehicles.row_count(), 1);

    println!("\n📝 Stage 3: Another tenant is unaffected");
    service
        .create_vehicle(tenants.globex, vehicle_draft("LM71 XKB", &[]))
        .await
        .expect("Failed to create vehicle for second tenant");

    println!("\n📝 Stage 4: Updates cannot steal a sibling registration");
    let second = service
        .create_vehicle(tenants.acme, vehicle_draft("WX19 KELL", &[]))
        .await
        .expect("Failed to create vehicle");
    let stolen = service
        .update_vehicle(tenants.acme, second.id, vehicle_draft("LM71 XKB", &[]))
        .await;
    assert!(matches!(stolen, Err(RegistryError::Conflict { .. })));

    println!("\n📝 Stage 5: Re-saving its own registration is fine");
    let resaved = service
        .update_vehicle(
            tenants.acme,
            second.id,
            VehicleDraft {
                label: Some("Pool car".to_string()),
                ..vehicle_draft("WX19 KELL", &[])
            },
        )
        .await
        .expect("Failed to update vehicle");
    assert_eq!(resaved.label.as_deref(), Some("Pool car"));
}

#[tokio::test]
async fn test_vehicle_lifecycle() {
    let (service, _, vehicles) = test_service();
    let tenants = TestTenants::new();

    print_test_header(
        "test_vehicle_lifecycle",
        &["Create, read, update and delete of a vehicle with attributes."],
    );

    println!("\n📝 Stage 1: Blank registrations are rejected");
    let blank = service
        .create_vehicle(tenants.acme, vehicle_draft("  ", &[]))
        .await;
    assert!(matches!(blank, Err(RegistryError::Validation { .. })));

    println!("\n📝 Stage 2: Create with attributes and a label to trim");
    let created = service
        .create_vehicle(
            tenants.acme,
            VehicleDraft {
                label: Some("   ".to_string()),
                ..vehicle_draft(" LM71 XKB ", &[("fuel", "diesel"), ("mot_due", "2026-03-01")])
            },
        )
        .await
        .expect("Failed to create vehicle");
    assert_eq!(created.registration_no, "LM71 XKB");
    assert_eq!(created.label, None);

    println!("\n📝 Stage 3: Replace the attribute set");
    let updated = service
        .update_vehicle(
            tenants.acme,
            created.id,
            vehicle_draft("LM71 XKB", &[("fuel", "electric")]),
        )
        .await
        .expect("Failed to update vehicle");
    assert_eq!(updated.attributes.len(), 1);
    assert_eq!(
        updated.attributes.get("fuel").map(String::as_str),
        Some("electric")
    );

    println!("\n📝 Stage 4: Delete and verify it is gone");
    service
        .delete_vehicle(tenants.acme, created.id)
        .await
        .expect("Failed to delete vehicle");
    assert_eq!(vehicles.row_count(), 0);
    let gone = service.get_vehicle(tenants.acme, created.id).await;
    assert!(matches!(gone, Err(RegistryError::NotFound { .. })));
}

#[tokio::test]
async fn test_tenant_isolation() {
    let (service, premises, _) = test_service();
    let tenants = TestTenants::new();
    tenants.print_structure();

    print_test_header(
        "test_tenant_isolation",
        &["One tenant can never see or touch another tenant's records."],
    );

    let acme_premise = service
        .create_premise(tenants.acme, premise_draft("Riverside House", &[]))
        .await
        .expect("Failed to create premise");
    service
        .create_premise(tenants.globex, premise_draft("Globex Tower", &[]))
        .await
        .expect("Failed to create premise");

    println!("\n📝 Stage 1: Lists are scoped");
    let acme_list = service
        .list_premises(tenants.acme)
        .await
        .expect("Failed to list premises");
    assert_eq!(acme_list.len(), 1);
    assert_eq!(acme_list[0].name, "Riverside House");

    println!("\n📝 Stage 2: Cross-tenant reads and deletes are a 404");
    let peek = service.get_premise(tenants.globex, acme_premise.id).await;
    assert!(matches!(peek, Err(RegistryError::NotFound { .. })));
    let steal = service
        .delete_premise(tenants.globex, acme_premise.id)
        .await;
    assert!(matches!(steal, Err(RegistryError::NotFound { .. })));
    assert_eq!(premises.row_count(), 2);
}
