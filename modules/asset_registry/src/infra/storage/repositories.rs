//! SeaORM repository implementations

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, SqlErr,
    TransactionTrait,
};
use uuid::Uuid;

use crate::contract::model::{Premise, PremiseSummary, Vehicle, VehicleSummary};
use crate::contract::RegistryError;
use crate::domain::repository::{PremiseRepository, VehicleRepository};

use super::{entity, mapper};

// ===== Premise repository =====

pub struct SeaOrmPremiseRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmPremiseRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PremiseRepository for SeaOrmPremiseRepository {
    async fn create(&self, premise: &Premise) -> Result<Premise> {
        let txn = self.db.begin().await?;

        let result = entity::premise::Entity::insert(mapper::premise_active_model(premise))
            .exec(&txn)
            .await?;
        let premise_id = result.last_insert_id;

        if !premise.attributes.is_empty() {
            entity::premise_attribute::Entity::insert_many(mapper::premise_attribute_models(
                premise_id,
                premise.tenant_id,
                &premise.attributes,
            ))
            .exec(&txn)
            .await?;
        }
        txn.commit().await?;

        let mut created = premise.clone();
        created.id = premise_id;
        Ok(created)
    }

    async fn update(&self, premise: &Premise) -> Result<Premise> {
        let txn = self.db.begin().await?;

        entity::premise::Entity::update(mapper::premise_active_model(premise))
            .exec(&txn)
            .await?;

        // The attribute set is replaced wholesale on every update
        entity::premise_attribute::Entity::delete_many()
            .filter(entity::premise_attribute::Column::PremiseId.eq(premise.id))
            .exec(&txn)
            .await?;
        if !premise.attributes.is_empty() {
            entity::premise_attribute::Entity::insert_many(mapper::premise_attribute_models(
                premise.id,
                premise.tenant_id,
                &premise.attributes,
            ))
            .exec(&txn)
            .await?;
        }

        txn.commit().await?;
        Ok(premise.clone())
    }

    async fn find(&self, tenant: Uuid, premise_id: i64) -> Result<Option<Premise>> {
        let Some(core) = entity::premise::Entity::find_by_id(premise_id)
            .filter(entity::premise::Column::TenantId.eq(tenant))
            .one(&*self.db)
            .await?
        else {
            return Ok(None);
        };
        let attributes = entity::premise_attribute::Entity::find()
            .filter(entity::premise_attribute::Column::PremiseId.eq(premise_id))
            .all(&*self.db)
            .await?;
        Ok(Some(mapper::premise_from_models(core, attributes)))
    }

    async fn list(&self, tenant: Uuid) -> Result<Vec<PremiseSummary>> {
        let rows = entity::premise::Entity::find()
            .filter(entity::premise::Column::TenantId.eq(tenant))
            .order_by_desc(entity::premise::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete(&self, tenant: Uuid, premise_id: i64) -> Result<()> {
        let txn = self.db.begin().await?;
        entity::premise_attribute::Entity::delete_many()
            .filter(entity::premise_attribute::Column::PremiseId.eq(premise_id))
            .exec(&txn)
            .await?;
        entity::premise::Entity::delete_many()
            .filter(entity::premise::Column::Id.eq(premise_id))
            .filter(entity::premise::Column::TenantId.eq(tenant))
            .exec(&txn)
            .await?;
        txn.commit().await?;
        Ok(())
    }
}

// ===== Vehicle repository =====

pub struct SeaOrmVehicleRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmVehicleRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VehicleRepository for SeaOrmVehicleRepository {
    async fn create(&self, vehicle: &Vehicle) -> Result<Vehicle> {
        let txn = self.db.begin().await?;

        let result = entity::vehicle::Entity::insert(mapper::vehicle_active_model(vehicle))
            .exec(&txn)
            .await
            .map_err(classify_registration_conflict)?;
        let vehicle_id = result.last_insert_id;

        if !vehicle.attributes.is_empty() {
            entity::vehicle_attribute::Entity::insert_many(mapper::vehicle_attribute_models(
                vehicle_id,
                vehicle.tenant_id,
                &vehicle.attributes,
            ))
            .exec(&txn)
            .await?;
        }
        txn.commit().await?;

        let mut created = vehicle.clone();
        created.id = vehicle_id;
        Ok(created)
    }

    async fn update(&self, vehicle: &Vehicle) -> Result<Vehicle> {
        let txn = self.db.begin().await?;

        entity::vehicle::Entity::update(mapper::vehicle_active_model(vehicle))
            .exec(&txn)
            .await
            .map_err(classify_registration_conflict)?;

        entity::vehicle_attribute::Entity::delete_many()
            .filter(entity::vehicle_attribute::Column::VehicleId.eq(vehicle.id))
            .exec(&txn)
            .await?;
        if !vehicle.attributes.is_empty() {
            entity::vehicle_attribute::Entity::insert_many(mapper::vehicle_attribute_models(
                vehicle.id,
                vehicle.tenant_id,
                &vehicle.attributes,
            ))
            .exec(&txn)
            .await?;
        }

        txn.commit().await?;
        Ok(vehicle.clone())
    }

    async fn find(&self, tenant: Uuid, vehicle_id: i64) -> Result<Option<Vehicle>> {
        let Some(core) = entity::vehicle::Entity::find_by_id(vehicle_id)
            .filter(entity::vehicle::Column::TenantId.eq(tenant))
            .one(&*self.db)
            .await?
        else {
            return Ok(None);
        };
        let attributes = entity::vehicle_attribute::Entity::find()
            .filter(entity::vehicle_attribute::Column::VehicleId.eq(vehicle_id))
            .all(&*self.db)
            .await?;
        Ok(Some(mapper::vehicle_from_models(core, attributes)))
    }

    async fn list(&self, tenant: Uuid) -> Result<Vec<VehicleSummary>> {
        let rows = entity::vehicle::Entity::find()
            .filter(entity::vehicle::Column::TenantId.eq(tenant))
            .order_by_desc(entity::vehicle::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete(&self, tenant: Uuid, vehicle_id: i64) -> Result<()> {
        let txn = self.db.begin().await?;
        entity::vehicle_attribute::Entity::delete_many()
            .filter(entity::vehicle_attribute::Column::VehicleId.eq(vehicle_id))
            .exec(&txn)
            .await?;
        entity::vehicle::Entity::delete_many()
            .filter(entity::vehicle::Column::Id.eq(vehicle_id))
            .filter(entity::vehicle::Column::TenantId.eq(tenant))
            .exec(&txn)
            .await?;
        txn.commit().await?;
        Ok(())
    }
}

/// Two writers can both carry the same registration number; the unique
/// index rejects the loser and we surface that as a conflict rather than
/// an internal error.
fn classify_registration_conflict(err: DbErr) -> anyhow::Error {
    if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        anyhow::Error::new(RegistryError::Conflict {
            reason: "a vehicle with this registration number already exists".to_string(),
        })
    } else {
        err.into()
    }
}
