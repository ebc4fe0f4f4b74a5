//! Database migrations for the module configuration engine

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    // Each module keeps its own migration journal so two migrators never
    // fight over one shared seaql_migrations table.
    fn migration_table_name() -> sea_orm::sea_query::DynIden {
        Alias::new("module_config_migrations").into_iden()
    }

    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250210_000001_create_catalogs::Migration),
            Box::new(m20250210_000002_create_field_schema::Migration),
            Box::new(m20250210_000003_create_activations::Migration),
        ]
    }
}

mod m20250210_000001_create_catalogs {
    use super::*;

    pub struct Migration;

    // DeriveMigrationName resolves to the file stem, which is "mod" for
    // every inline migration here; name them explicitly so the journal's
    // unique version column holds.
    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250210_000001_create_catalogs"
        }
    }

    const SEED_MODULES: &str = "INSERT INTO modules (id, name, active) VALUES \
        (1, 'Premises', TRUE), \
        (2, 'Vehicles', TRUE)";

    const SEED_COUNTRIES: &str = "INSERT INTO countries (id, label) VALUES \
        (1, 'United Kingdom'), \
        (2, 'Ireland'), \
        (3, 'United States'), \
        (4, 'Germany'), \
        (5, 'France')";

    const SEED_PROPERTY_TYPES: &str = "INSERT INTO property_types (id, label) VALUES \
        (1, 'Commercial'), \
        (2, 'Residential'), \
        (3, 'Industrial'), \
        (4, 'Mixed Use')";

    const SEED_PREMISES_TYPES: &str = "INSERT INTO premises_types (id, label) VALUES \
        (1, 'Office'), \
        (2, 'Warehouse'), \
        (3, 'Retail Unit'), \
        (4, 'Apartment Block'), \
        (5, 'Car Park')";

    const SEED_AREAS: &str = "INSERT INTO areas (id, label) VALUES \
        (1, 'North'), \
        (2, 'South'), \
        (3, 'East'), \
        (4, 'West'), \
        (5, 'Central')";

    const SEED_STATUSES: &str = "INSERT INTO statuses (id, label) VALUES \
        (1, 'Active'), \
        (2, 'Inactive'), \
        (3, 'Archived')";

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Modules::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Modules::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Modules::Name).string().not_null())
                        .col(ColumnDef::new(Modules::Active).boolean().not_null())
                        .to_owned(),
                )
                .await?;

            for table in [
                Catalog::Countries,
                Catalog::PropertyTypes,
                Catalog::PremisesTypes,
                Catalog::Areas,
                Catalog::Statuses,
            ] {
                manager
                    .create_table(
                        Table::create()
                            .table(table)
                            .if_not_exists()
                            .col(
                                ColumnDef::new(Catalog::Id)
                                    .big_integer()
                                    .not_null()
                                    .auto_increment()
                                    .primary_key(),
                            )
                            .col(ColumnDef::new(Catalog::Label).string().not_null())
                            .to_owned(),
                    )
                    .await?;
            }

            let conn = manager.get_connection();
            for seed in [
                SEED_MODULES,
                SEED_COUNTRIES,
                SEED_PROPERTY_TYPES,
                SEED_PREMISES_TYPES,
                SEED_AREAS,
                SEED_STATUSES,
            ] {
                conn.execute_unprepared(seed).await?;
            }
            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            for table in [
                Catalog::Statuses,
                Catalog::Areas,
                Catalog::PremisesTypes,
                Catalog::PropertyTypes,
                Catalog::Countries,
            ] {
                manager
                    .drop_table(Table::drop().table(table).to_owned())
                    .await?;
            }
            manager
                .drop_table(Table::drop().table(Modules::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Modules {
        Table,
        Id,
        Name,
        Active,
    }

    /// The five label catalogs share one shape
    #[derive(DeriveIden, Clone, Copy)]
    enum Catalog {
        Countries,
        PropertyTypes,
        PremisesTypes,
        Areas,
        Statuses,
        Id,
        Label,
    }
}

mod m20250210_000002_create_field_schema {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250210_000002_create_field_schema"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(FieldSections::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(FieldSections::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(FieldSections::TenantId).uuid().not_null())
                        .col(
                            ColumnDef::new(FieldSections::ModuleId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(FieldSections::Name).string().not_null())
                        .col(
                            ColumnDef::new(FieldSections::SortOrder)
                                .integer()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_field_sections_module")
                                .from(FieldSections::Table, FieldSections::ModuleId)
                                .to(Modules::Table, Modules::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_field_sections_tenant_module")
                        .table(FieldSections::Table)
                        .col(FieldSections::TenantId)
                        .col(FieldSections::ModuleId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(FieldDefinitions::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(FieldDefinitions::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(FieldDefinitions::TenantId).uuid().not_null())
                        .col(
                            ColumnDef::new(FieldDefinitions::ModuleId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(FieldDefinitions::SectionId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(FieldDefinitions::Key).string().not_null())
                        .col(ColumnDef::new(FieldDefinitions::Label).string().not_null())
                        .col(
                            ColumnDef::new(FieldDefinitions::FieldType)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(FieldDefinitions::Placeholder).string())
                        .col(
                            ColumnDef::new(FieldDefinitions::Required)
                                .boolean()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(FieldDefinitions::Active)
                                .boolean()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(FieldDefinitions::SortOrder)
                                .integer()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_field_definitions_section")
                                .from(FieldDefinitions::Table, FieldDefinitions::SectionId)
                                .to(FieldSections::Table, FieldSections::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_field_definitions_module")
                                .from(FieldDefinitions::Table, FieldDefinitions::ModuleId)
                                .to(Modules::Table, Modules::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            // One key per section
            manager
                .create_index(
                    Index::create()
                        .name("uq_field_definitions_section_key")
                        .table(FieldDefinitions::Table)
                        .col(FieldDefinitions::SectionId)
                        .col(FieldDefinitions::Key)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_field_definitions_tenant_module")
                        .table(FieldDefinitions::Table)
                        .col(FieldDefinitions::TenantId)
                        .col(FieldDefinitions::ModuleId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(FieldOptions::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(FieldOptions::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(FieldOptions::FieldId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(FieldOptions::Label).string().not_null())
                        .col(ColumnDef::new(FieldOptions::Value).string().not_null())
                        .col(ColumnDef::new(FieldOptions::SortOrder).integer().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_field_options_field")
                                .from(FieldOptions::Table, FieldOptions::FieldId)
                                .to(FieldDefinitions::Table, FieldDefinitions::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_field_options_field")
                        .table(FieldOptions::Table)
                        .col(FieldOptions::FieldId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(FieldOptions::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(FieldDefinitions::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(FieldSections::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum FieldSections {
        Table,
        Id,
        TenantId,
        ModuleId,
        Name,
        SortOrder,
    }

    #[derive(DeriveIden)]
    enum FieldDefinitions {
        Table,
        Id,
        TenantId,
        ModuleId,
        SectionId,
        Key,
        Label,
        FieldType,
        Placeholder,
        Required,
        Active,
        SortOrder,
    }

    #[derive(DeriveIden)]
    enum FieldOptions {
        Table,
        Id,
        FieldId,
        Label,
        Value,
        SortOrder,
    }

    #[derive(DeriveIden)]
    enum Modules {
        Table,
        Id,
    }
}

mod m20250210_000003_create_activations {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250210_000003_create_activations"
        }
    }

    /// NULL scope columns mean "any value", so a plain unique constraint
    /// would let duplicate wildcard rows through (NULL != NULL in SQL).
    /// Coalescing to 0 makes the tuple comparable; 0 is never a catalog id.
    const UNIQUE_SCOPE_INDEX: &str = "CREATE UNIQUE INDEX uq_module_activations_scope \
        ON module_activations (tenant_id, module_id, \
        COALESCE(country_id, 0), COALESCE(property_type_id, 0), \
        COALESCE(premises_type_id, 0), COALESCE(area_id, 0))";

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ModuleActivations::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ModuleActivations::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(ModuleActivations::TenantId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ModuleActivations::ModuleId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ModuleActivations::Enabled)
                                .boolean()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ModuleActivations::CountryId).big_integer())
                        .col(ColumnDef::new(ModuleActivations::PropertyTypeId).big_integer())
                        .col(ColumnDef::new(ModuleActivations::PremisesTypeId).big_integer())
                        .col(ColumnDef::new(ModuleActivations::AreaId).big_integer())
                        .col(ColumnDef::new(ModuleActivations::StatusId).big_integer())
                        .col(
                            ColumnDef::new(ModuleActivations::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_module_activations_module")
                                .from(ModuleActivations::Table, ModuleActivations::ModuleId)
                                .to(Modules::Table, Modules::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_module_activations_country")
                                .from(ModuleActivations::Table, ModuleActivations::CountryId)
                                .to(Countries::Table, Countries::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_module_activations_property_type")
                                .from(ModuleActivations::Table, ModuleActivations::PropertyTypeId)
                                .to(PropertyTypes::Table, PropertyTypes::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_module_activations_premises_type")
                                .from(ModuleActivations::Table, ModuleActivations::PremisesTypeId)
                                .to(PremisesTypes::Table, PremisesTypes::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_module_activations_area")
                                .from(ModuleActivations::Table, ModuleActivations::AreaId)
                                .to(Areas::Table, Areas::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_module_activations_status")
                                .from(ModuleActivations::Table, ModuleActivations::StatusId)
                                .to(Statuses::Table, Statuses::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_module_activations_tenant_module")
                        .table(ModuleActivations::Table)
                        .col(ModuleActivations::TenantId)
                        .col(ModuleActivations::ModuleId)
                        .to_owned(),
                )
                .await?;

            manager
                .get_connection()
                .execute_unprepared(UNIQUE_SCOPE_INDEX)
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ActivationFields::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ActivationFields::ActivationId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ActivationFields::FieldId)
                                .big_integer()
                                .not_null(),
                        )
                        .primary_key(
                            Index::create()
                                .col(ActivationFields::ActivationId)
                                .col(ActivationFields::FieldId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_activation_fields_activation")
                                .from(ActivationFields::Table, ActivationFields::ActivationId)
                                .to(ModuleActivations::Table, ModuleActivations::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_activation_fields_field")
                                .from(ActivationFields::Table, ActivationFields::FieldId)
                                .to(FieldDefinitions::Table, FieldDefinitions::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_activation_fields_field")
                        .table(ActivationFields::Table)
                        .col(ActivationFields::FieldId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ActivationFields::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ModuleActivations::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum ModuleActivations {
        Table,
        Id,
        TenantId,
        ModuleId,
        Enabled,
        CountryId,
        PropertyTypeId,
        PremisesTypeId,
        AreaId,
        StatusId,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum ActivationFields {
        Table,
        ActivationId,
        FieldId,
    }

    #[derive(DeriveIden)]
    enum Modules {
        Table,
        Id,
    }

    #[derive(DeriveIden)]
    enum FieldDefinitions {
        Table,
        Id,
    }

    #[derive(DeriveIden)]
    enum Countries {
        Table,
        Id,
    }

    #[derive(DeriveIden)]
    enum PropertyTypes {
        Table,
        Id,
    }

    #[derive(DeriveIden)]
    enum PremisesTypes {
        Table,
        Id,
    }

    #[derive(DeriveIden)]
    enum Areas {
        Table,
        Id,
    }

    #[derive(DeriveIden)]
    enum Statuses {
        Table,
        Id,
    }
}
