//! Shared fixtures and in-memory repositories for asset_registry tests

// Each test binary uses its own subset of these helpers
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use asset_registry::contract::{Premise, PremiseSummary, Vehicle, VehicleSummary};
use asset_registry::domain::repository::{PremiseRepository, VehicleRepository};
use asset_registry::domain::RegistryService;
use asset_registry::{Config, RegistryError};

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

// Mock repository implementations for testing
pub mod mocks {
    use super::*;

    fn premise_summary(premise: &Premise) -> PremiseSummary {
        PremiseSummary {
            id: premise.id,
            tenant_id: premise.tenant_id,
            name: premise.name.clone(),
            address: premise.address.clone(),
            country_id: premise.country_id,
            area_id: premise.area_id,
            status_id: premise.status_id,
            created_at: premise.created_at,
        }
    }

    fn vehicle_summary(vehicle: &Vehicle) -> VehicleSummary {
        VehicleSummary {
            id: vehicle.id,
            tenant_id: vehicle.tenant_id,
            registration_no: vehicle.registration_no.clone(),
            label: vehicle.label.clone(),
            country_id: vehicle.country_id,
            area_id: vehicle.area_id,
            status_id: vehicle.status_id,
            created_at: vehicle.created_at,
        }
    }

    #[derive(Clone)]
    pub struct MockPremiseRepo {
        rows: Arc<RwLock<HashMap<i64, Premise>>>,
        next_id: Arc<RwLock<i64>>,
    }

    impl MockPremiseRepo {
        pub fn new() -> Self {
            Self {
                rows: Arc::new(RwLock::new(HashMap::new())),
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

        /// Stored attribute map for a premise, bypassing the service
        pub fn stored_attributes(&self, premise_id: i64) -> Option<HashMap<String, String>> {
            self.rows
                .read()
                .get(&premise_id)
                .map(|p| p.attributes.clone().into_iter().collect())
        }

        /// Plant a row as-is, bypassing service validation
        pub fn plant(&self, premise: Premise) {
            self.rows.write().insert(premise.id, premise);
        }

        pub fn print_state(&self, context: &str) {
            let rows = self.rows.read();
            println!("\n========== Premise State: {} ==========", context);
            println!("Rows: {}", rows.len());
            for premise in rows.values() {
                println!(
                    "  Premise {}: {} ({} attributes)",
                    premise.id,
                    premise.name,
                    premise.attributes.len()
                );
            }
            println!("=========================================\n");
        }
    }

    #[async_trait]
    impl PremiseRepository for MockPremiseRepo {
        async fn create(&self, premise: &Premise) -> anyhow::Result<Premise> {
            let mut created = premise.clone();
            created.id = self.next_id();
            self.rows.write().insert(created.id, created.clone());
            Ok(created)
        }

        async fn update(&self, premise: &Premise) -> anyhow::Result<Premise> {
            self.rows.write().insert(premise.id, premise.clone());
            Ok(premise.clone())
        }

        async fn find(&self, tenant: Uuid, premise_id: i64) -> anyhow::Result<Option<Premise>> {
            Ok(self
                .rows
                .read()
                .get(&premise_id)
                .filter(|p| p.tenant_id == tenant)
                .cloned())
        }

        async fn list(&self, tenant: Uuid) -> anyhow::Result<Vec<PremiseSummary>> {
            let mut summaries: Vec<PremiseSummary> = self
                .rows
                .read()
                .values()
                .filter(|p| p.tenant_id == tenant)
                .map(premise_summary)
                .collect();
            summaries.sort_by_key(|s| std::cmp::Reverse(s.id));
            Ok(summaries)
        }

        async fn delete(&self, _tenant: Uuid, premise_id: i64) -> anyhow::Result<()> {
            self.rows.write().remove(&premise_id);
            Ok(())
        }
    }

    #[derive(Clone)]
    pub struct MockVehicleRepo {
        rows: Arc<RwLock<HashMap<i64, Vehicle>>>,
        next_id: Arc<RwLock<i64>>,
    }

    impl MockVehicleRepo {
        pub fn new() -> Self {
            Self {
                rows: Arc::new(RwLock::new(HashMap::new())),
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

        /// Mirrors the unique registration index of the real schema
        fn registration_taken(&self, vehicle: &Vehicle, exclude_id: Option<i64>) -> bool {
            self.rows.read().values().any(|row| {
                Some(row.id) != exclude_id
                    && row.tenant_id == vehicle.tenant_id
                    && row.registration_no == vehicle.registration_no
            })
        }

        fn registration_conflict() -> anyhow::Error {
            anyhow::Error::new(RegistryError::Conflict {
                reason: "a vehicle with this registration number already exists".to_string(),
            })
        }
    }

    #[async_trait]
    impl VehicleRepository for MockVehicleRepo {
        async fn create(&self, vehicle: &Vehicle) -> anyhow::Result<Vehicle> {
            if self.registration_taken(vehicle, None) {
                return Err(Self::registration_conflict());
            }
            let mut created = vehicle.clone();
            created.id = self.next_id();
            self.rows.write().insert(created.id, created.clone());
            Ok(created)
        }

        async fn update(&self, vehicle: &Vehicle) -> anyhow::Result<Vehicle> {
            if self.registration_taken(vehicle, Some(vehicle.id)) {
                return Err(Self::registration_conflict());
            }
            self.rows.write().insert(vehicle.id, vehicle.clone());
            Ok(vehicle.clone())
        }

        async fn find(&self, tenant: Uuid, vehicle_id: i64) -> anyhow::Result<Option<Vehicle>> {
            Ok(self
                .rows
                .read()
                .get(&vehicle_id)
                .filter(|v| v.tenant_id == tenant)
                .cloned())
        }

        async fn list(&self, tenant: Uuid) -> anyhow::Result<Vec<VehicleSummary>> {
            let mut summaries: Vec<VehicleSummary> = self
                .rows
                .read()
                .values()
                .filter(|v| v.tenant_id == tenant)
                .map(vehicle_summary)
                .collect();
            summaries.sort_by_key(|s| std::cmp::Reverse(s.id));
            Ok(summaries)
        }

        async fn delete(&self, _tenant: Uuid, vehicle_id: i64) -> anyhow::Result<()> {
            self.rows.write().remove(&vehicle_id);
            Ok(())
        }
    }
}

/// Service over fresh mocks with the default configuration
pub fn test_service() -> (
    Arc<RegistryService>,
    mocks::MockPremiseRepo,
    mocks::MockVehicleRepo,
) {
    test_service_with_config(Config::default())
}

pub fn test_service_with_config(
    config: Config,
) -> (
    Arc<RegistryService>,
    mocks::MockPremiseRepo,
    mocks::MockVehicleRepo,
) {
    let premises = mocks::MockPremiseRepo::new();
    let vehicles = mocks::MockVehicleRepo::new();
    let service = RegistryService::new(
        Arc::new(premises.clone()),
        Arc::new(vehicles.clone()),
        config,
    );
    (Arc::new(service), premises, vehicles)
}
