//! Module wiring: repositories, service and route registration

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;

use crate::config::Config;
use crate::domain::ConfigService;
use crate::infra::storage::{
    Migrator, SeaOrmActivationRepository, SeaOrmCatalogRepository, SeaOrmSchemaRepository,
};

/// Module configuration engine bound to a live database connection
pub struct ModuleConfigModule {
    service: Arc<ConfigService>,
}

impl ModuleConfigModule {
    pub fn new(db: Arc<DatabaseConnection>, config: Config) -> Self {
        let catalog = Arc::new(SeaOrmCatalogRepository::new(db.clone()));
        let schema = Arc::new(SeaOrmSchemaRepository::new(db.clone()));
        let activations = Arc::new(SeaOrmActivationRepository::new(db));
        let service = Arc::new(ConfigService::new(catalog, schema, activations, config));
        Self { service }
    }

    /// Apply pending migrations; the journal lives in
    /// `module_config_migrations`
    pub async fn migrate(db: &DatabaseConnection) -> Result<()> {
        Migrator::up(db, None).await?;
        tracing::info!("module_config migrations applied");
        Ok(())
    }

    pub fn service(&self) -> Arc<ConfigService> {
        self.service.clone()
    }

    /// Mount this module's REST routes onto `router`
    pub fn router(&self, router: Router) -> Router {
        crate::api::rest::routes::register_routes(router, self.service.clone())
    }
}
