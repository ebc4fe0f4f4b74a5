//! Module wiring: repositories, service and route registration

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;

use crate::config::Config;
use crate::domain::RegistryService;
use crate::infra::storage::{Migrator, SeaOrmPremiseRepository, SeaOrmVehicleRepository};

/// Asset registry bound to a live database connection
pub struct AssetRegistryModule {
    service: Arc<RegistryService>,
}

impl AssetRegistryModule {
    pub fn new(db: Arc<DatabaseConnection>, config: Config) -> Self {
        let premises = Arc::new(SeaOrmPremiseRepository::new(db.clone()));
        let vehicles = Arc::new(SeaOrmVehicleRepository::new(db));
        let service = Arc::new(RegistryService::new(premises, vehicles, config));
        Self { service }
    }

    /// Apply pending migrations; the journal lives in
    /// `asset_registry_migrations`
    pub async fn migrate(db: &DatabaseConnection) -> Result<()> {
        Migrator::up(db, None).await?;
        tracing::info!("asset_registry migrations applied");
        Ok(())
    }

    pub fn service(&self) -> Arc<RegistryService> {
        self.service.clone()
    }

    /// Mount this module's REST routes onto `router`
    pub fn router(&self, router: Router) -> Router {
        crate::api::rest::routes::register_routes(router, self.service.clone())
    }
}
