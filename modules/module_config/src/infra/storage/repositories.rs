//! SeaORM repository implementations

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    SqlErr, TransactionTrait,
};
use uuid::Uuid;

use crate::contract::model::{
    Activation, FieldDefinition, FieldSection, Module, ScopeDimension, ScopeValue, Status,
};
use crate::contract::ConfigError;
use crate::domain::repository::{ActivationRepository, CatalogRepository, SchemaRepository};

use super::{entity, mapper};

// ===== Catalog repository =====

pub struct SeaOrmCatalogRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmCatalogRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogRepository for SeaOrmCatalogRepository {
    async fn list_modules(&self) -> Result<Vec<Module>> {
        let rows = entity::module::Entity::find()
            .order_by_asc(entity::module::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_module(&self, module_id: i64) -> Result<Option<Module>> {
        let row = entity::module::Entity::find_by_id(module_id)
            .one(&*self.db)
            .await?;
        Ok(row.map(Into::into))
    }

    async fn scope_values(&self, dimension: ScopeDimension) -> Result<Vec<ScopeValue>> {
        let values: Vec<ScopeValue> = match dimension {
            ScopeDimension::Country => entity::country::Entity::find()
                .order_by_asc(entity::country::Column::Label)
                .all(&*self.db)
                .await?
                .into_iter()
                .map(Into::into)
                .collect(),
            ScopeDimension::PropertyType => entity::property_type::Entity::find()
                .order_by_asc(entity::property_type::Column::Label)
                .all(&*self.db)
                .await?
                .into_iter()
                .map(Into::into)
                .collect(),
            ScopeDimension::PremisesType => entity::premises_type::Entity::find()
                .order_by_asc(entity::premises_type::Column::Label)
                .all(&*self.db)
                .await?
                .into_iter()
                .map(Into::into)
                .collect(),
            ScopeDimension::Area => entity::area::Entity::find()
                .order_by_asc(entity::area::Column::Label)
                .all(&*self.db)
                .await?
                .into_iter()
                .map(Into::into)
                .collect(),
        };
        Ok(values)
    }

    async fn scope_value_exists(&self, dimension: ScopeDimension, id: i64) -> Result<bool> {
        let count = match dimension {
            ScopeDimension::Country => {
                entity::country::Entity::find_by_id(id).count(&*self.db).await?
            }
            ScopeDimension::PropertyType => {
                entity::property_type::Entity::find_by_id(id)
                    .count(&*self.db)
                    .await?
            }
            ScopeDimension::PremisesType => {
                entity::premises_type::Entity::find_by_id(id)
                    .count(&*self.db)
                    .await?
            }
            ScopeDimension::Area => entity::area::Entity::find_by_id(id).count(&*self.db).await?,
        };
        Ok(count > 0)
    }

    async fn list_statuses(&self) -> Result<Vec<Status>> {
        let rows = entity::status::Entity::find()
            .order_by_asc(entity::status::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn status_exists(&self, status_id: i64) -> Result<bool> {
        let count = entity::status::Entity::find_by_id(status_id)
            .count(&*self.db)
            .await?;
        Ok(count > 0)
    }
}

// ===== Schema repository =====

pub struct SeaOrmSchemaRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmSchemaRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Load option rows for a set of fields with one query and zip them
    /// back onto their fields.
    async fn with_options(
        &self,
        fields: Vec<entity::field_definition::Model>,
    ) -> Result<Vec<FieldDefinition>> {
        if fields.is_empty() {
            return Ok(Vec::new());
        }
        let field_ids: Vec<i64> = fields.iter().map(|f| f.id).collect();
        let option_rows = entity::field_option::Entity::find()
            .filter(entity::field_option::Column::FieldId.is_in(field_ids))
            .order_by_asc(entity::field_option::Column::SortOrder)
            .order_by_asc(entity::field_option::Column::Id)
            .all(&*self.db)
            .await?;

        let mut grouped: HashMap<i64, Vec<entity::field_option::Model>> = HashMap::new();
        for row in option_rows {
            grouped.entry(row.field_id).or_default().push(row);
        }
        Ok(fields
            .into_iter()
            .map(|f| {
                let options = grouped.remove(&f.id).unwrap_or_default();
                mapper::field_from_models(f, options)
            })
            .collect())
    }
}

#[async_trait]
impl SchemaRepository for SeaOrmSchemaRepository {
    async fn create_section(&self, section: &FieldSection) -> Result<FieldSection> {
        let result = entity::field_section::Entity::insert(mapper::section_active_model(section))
            .exec(&*self.db)
            .await?;
        let mut created = section.clone();
        created.id = result.last_insert_id;
        Ok(created)
    }

    async fn find_section(&self, tenant: Uuid, section_id: i64) -> Result<Option<FieldSection>> {
        let row = entity::field_section::Entity::find_by_id(section_id)
            .filter(entity::field_section::Column::TenantId.eq(tenant))
            .one(&*self.db)
            .await?;
        Ok(row.map(Into::into))
    }

    async fn list_sections(&self, tenant: Uuid, module_id: i64) -> Result<Vec<FieldSection>> {
        let rows = entity::field_section::Entity::find()
            .filter(entity::field_section::Column::TenantId.eq(tenant))
            .filter(entity::field_section::Column::ModuleId.eq(module_id))
            .order_by_asc(entity::field_section::Column::SortOrder)
            .order_by_asc(entity::field_section::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update_section(&self, section: &FieldSection) -> Result<FieldSection> {
        let updated = entity::field_section::Entity::update(mapper::section_active_model(section))
            .exec(&*self.db)
            .await?;
        Ok(updated.into())
    }

    async fn delete_section(&self, tenant: Uuid, section_id: i64) -> Result<()> {
        let txn = self.db.begin().await?;

        let field_ids: Vec<i64> = entity::field_definition::Entity::find()
            .filter(entity::field_definition::Column::TenantId.eq(tenant))
            .filter(entity::field_definition::Column::SectionId.eq(section_id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|f| f.id)
            .collect();

        if !field_ids.is_empty() {
            entity::activation_field::Entity::delete_many()
                .filter(entity::activation_field::Column::FieldId.is_in(field_ids.clone()))
                .exec(&txn)
                .await?;
            entity::field_option::Entity::delete_many()
                .filter(entity::field_option::Column::FieldId.is_in(field_ids))
                .exec(&txn)
                .await?;
            entity::field_definition::Entity::delete_many()
                .filter(entity::field_definition::Column::SectionId.eq(section_id))
                .exec(&txn)
                .await?;
        }

        entity::field_section::Entity::delete_many()
            .filter(entity::field_section::Column::Id.eq(section_id))
            .filter(entity::field_section::Column::TenantId.eq(tenant))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(())
    }

    async fn create_field(&self, field: &FieldDefinition) -> Result<FieldDefinition> {
        let txn = self.db.begin().await?;
        let created = insert_field(&txn, field).await?;
        txn.commit().await?;
        Ok(created)
    }

    async fn create_fields(&self, fields: &[FieldDefinition]) -> Result<Vec<FieldDefinition>> {
        let txn = self.db.begin().await?;
        let mut created = Vec::with_capacity(fields.len());
        for field in fields {
            created.push(insert_field(&txn, field).await?);
        }
        txn.commit().await?;
        Ok(created)
    }

    async fn find_field(&self, tenant: Uuid, field_id: i64) -> Result<Option<FieldDefinition>> {
        let Some(row) = entity::field_definition::Entity::find_by_id(field_id)
            .filter(entity::field_definition::Column::TenantId.eq(tenant))
            .one(&*self.db)
            .await?
        else {
            return Ok(None);
        };
        let options = entity::field_option::Entity::find()
            .filter(entity::field_option::Column::FieldId.eq(field_id))
            .order_by_asc(entity::field_option::Column::SortOrder)
            .order_by_asc(entity::field_option::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(Some(mapper::field_from_models(row, options)))
    }

    async fn list_fields(&self, tenant: Uuid, section_id: i64) -> Result<Vec<FieldDefinition>> {
        let rows = entity::field_definition::Entity::find()
            .filter(entity::field_definition::Column::TenantId.eq(tenant))
            .filter(entity::field_definition::Column::SectionId.eq(section_id))
            .order_by_asc(entity::field_definition::Column::SortOrder)
            .order_by_asc(entity::field_definition::Column::Id)
            .all(&*self.db)
            .await?;
        self.with_options(rows).await
    }

    async fn list_module_fields(
        &self,
        tenant: Uuid,
        module_id: i64,
    ) -> Result<Vec<FieldDefinition>> {
        let rows = entity::field_definition::Entity::find()
            .filter(entity::field_definition::Column::TenantId.eq(tenant))
            .filter(entity::field_definition::Column::ModuleId.eq(module_id))
            .order_by_asc(entity::field_definition::Column::SectionId)
            .order_by_asc(entity::field_definition::Column::SortOrder)
            .order_by_asc(entity::field_definition::Column::Id)
            .all(&*self.db)
            .await?;
        self.with_options(rows).await
    }

    async fn update_field(&self, field: &FieldDefinition) -> Result<FieldDefinition> {
        let txn = self.db.begin().await?;

        let updated = entity::field_definition::Entity::update(mapper::field_active_model(field))
            .exec(&txn)
            .await?;

        // The option list is replaced wholesale on every update
        entity::field_option::Entity::delete_many()
            .filter(entity::field_option::Column::FieldId.eq(field.id))
            .exec(&txn)
            .await?;
        if !field.options.is_empty() {
            let models: Vec<_> = field
                .options
                .iter()
                .map(|o| mapper::option_active_model(field.id, o))
                .collect();
            entity::field_option::Entity::insert_many(models).exec(&txn).await?;
        }
        let options = entity::field_option::Entity::find()
            .filter(entity::field_option::Column::FieldId.eq(field.id))
            .order_by_asc(entity::field_option::Column::SortOrder)
            .order_by_asc(entity::field_option::Column::Id)
            .all(&txn)
            .await?;

        txn.commit().await?;
        Ok(mapper::field_from_models(updated, options))
    }

    async fn delete_field(&self, tenant: Uuid, field_id: i64) -> Result<()> {
        let txn = self.db.begin().await?;
        entity::activation_field::Entity::delete_many()
            .filter(entity::activation_field::Column::FieldId.eq(field_id))
            .exec(&txn)
            .await?;
        entity::field_option::Entity::delete_many()
            .filter(entity::field_option::Column::FieldId.eq(field_id))
            .exec(&txn)
            .await?;
        entity::field_definition::Entity::delete_many()
            .filter(entity::field_definition::Column::Id.eq(field_id))
            .filter(entity::field_definition::Column::TenantId.eq(tenant))
            .exec(&txn)
            .await?;
        txn.commit().await?;
        Ok(())
    }
}

/// Insert one field with its options inside an open transaction.
async fn insert_field<C>(conn: &C, field: &FieldDefinition) -> Result<FieldDefinition>
where
    C: sea_orm::ConnectionTrait,
{
    let result = entity::field_definition::Entity::insert(mapper::field_active_model(field))
        .exec(conn)
        .await?;
    let field_id = result.last_insert_id;

    if !field.options.is_empty() {
        let models: Vec<_> = field
            .options
            .iter()
            .map(|o| mapper::option_active_model(field_id, o))
            .collect();
        entity::field_option::Entity::insert_many(models).exec(conn).await?;
    }
    let options = entity::field_option::Entity::find()
        .filter(entity::field_option::Column::FieldId.eq(field_id))
        .order_by_asc(entity::field_option::Column::SortOrder)
        .order_by_asc(entity::field_option::Column::Id)
        .all(conn)
        .await?;

    let mut created = field.clone();
    created.id = field_id;
    created.options = options.into_iter().map(Into::into).collect();
    Ok(created)
}

// ===== Activation repository =====

pub struct SeaOrmActivationRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmActivationRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ActivationRepository for SeaOrmActivationRepository {
    async fn create(&self, activation: &Activation, field_ids: &[i64]) -> Result<Activation> {
        let txn = self.db.begin().await?;

        let result =
            entity::activation::Entity::insert(mapper::activation_active_model(activation))
                .exec(&txn)
                .await
                .map_err(classify_scope_conflict)?;
        let activation_id = result.last_insert_id;

        insert_selection(&txn, activation_id, field_ids).await?;
        txn.commit().await?;

        let mut created = activation.clone();
        created.id = activation_id;
        Ok(created)
    }

    async fn update(&self, activation: &Activation, field_ids: &[i64]) -> Result<Activation> {
        let txn = self.db.begin().await?;

        entity::activation::Entity::update(mapper::activation_active_model(activation))
            .exec(&txn)
            .await
            .map_err(classify_scope_conflict)?;

        entity::activation_field::Entity::delete_many()
            .filter(entity::activation_field::Column::ActivationId.eq(activation.id))
            .exec(&txn)
            .await?;
        insert_selection(&txn, activation.id, field_ids).await?;

        txn.commit().await?;
        Ok(activation.clone())
    }

    async fn find(&self, tenant: Uuid, activation_id: i64) -> Result<Option<Activation>> {
        let row = entity::activation::Entity::find_by_id(activation_id)
            .filter(entity::activation::Column::TenantId.eq(tenant))
            .one(&*self.db)
            .await?;
        Ok(row.map(Into::into))
    }

    async fn list_for_module(&self, tenant: Uuid, module_id: i64) -> Result<Vec<Activation>> {
        let rows = entity::activation::Entity::find()
            .filter(entity::activation::Column::TenantId.eq(tenant))
            .filter(entity::activation::Column::ModuleId.eq(module_id))
            .order_by_desc(entity::activation::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_enabled(&self, tenant: Uuid, module_id: i64) -> Result<Vec<Activation>> {
        let rows = entity::activation::Entity::find()
            .filter(entity::activation::Column::TenantId.eq(tenant))
            .filter(entity::activation::Column::ModuleId.eq(module_id))
            .filter(entity::activation::Column::Enabled.eq(true))
            .order_by_asc(entity::activation::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn selections_for(&self, activation_ids: &[i64]) -> Result<Vec<(i64, i64)>> {
        if activation_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = entity::activation_field::Entity::find()
            .filter(
                entity::activation_field::Column::ActivationId.is_in(activation_ids.to_vec()),
            )
            .order_by_asc(entity::activation_field::Column::ActivationId)
            .order_by_asc(entity::activation_field::Column::FieldId)
            .all(&*self.db)
            .await?;
        Ok(rows.into_iter().map(|r| (r.activation_id, r.field_id)).collect())
    }
}

async fn insert_selection<C>(conn: &C, activation_id: i64, field_ids: &[i64]) -> Result<()>
where
    C: sea_orm::ConnectionTrait,
{
    if field_ids.is_empty() {
        return Ok(());
    }
    let models: Vec<entity::activation_field::ActiveModel> = field_ids
        .iter()
        .map(|&field_id| entity::activation_field::ActiveModel {
            activation_id: Set(activation_id),
            field_id: Set(field_id),
        })
        .collect();
    entity::activation_field::Entity::insert_many(models).exec(conn).await?;
    Ok(())
}

/// Two writers can both pass the service-level duplicate check; the unique
/// scope index rejects the loser and we surface that as a conflict rather
/// than an internal error.
fn classify_scope_conflict(err: DbErr) -> anyhow::Error {
    if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        anyhow::Error::new(ConfigError::Conflict {
            reason: "an activation for this scope already exists".to_string(),
        })
    } else {
        err.into()
    }
}
