//! Database migrations for the asset registry

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    // Each module keeps its own migration journal so two migrators never
    // fight over one shared seaql_migrations table.
    fn migration_table_name() -> sea_orm::sea_query::DynIden {
        Alias::new("asset_registry_migrations").into_iden()
    }

    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250210_000001_create_premises::Migration),
            Box::new(m20250210_000002_create_vehicles::Migration),
        ]
    }
}

mod m20250210_000001_create_premises {
    use super::*;

    pub struct Migration;

    // DeriveMigrationName resolves to the file stem, which is "mod" for
    // every inline migration here; name them explicitly so the journal's
    // unique version column holds.
    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250210_000001_create_premises"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Premises::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Premises::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Premises::TenantId).uuid().not_null())
                        .col(ColumnDef::new(Premises::Name).string().not_null())
                        .col(ColumnDef::new(Premises::Address).string())
                        // Catalog references stay soft; the catalogs belong
                        // to another module's schema
                        .col(ColumnDef::new(Premises::CountryId).big_integer())
                        .col(ColumnDef::new(Premises::AreaId).big_integer())
                        .col(ColumnDef::new(Premises::StatusId).big_integer())
                        .col(
                            ColumnDef::new(Premises::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_premises_tenant")
                        .table(Premises::Table)
                        .col(Premises::TenantId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(PremiseAttributes::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PremiseAttributes::PremiseId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(PremiseAttributes::Key).string().not_null())
                        .col(
                            ColumnDef::new(PremiseAttributes::TenantId)
                                .uuid()
                                .not_null(),
                        )
                        .col(ColumnDef::new(PremiseAttributes::Value).string().not_null())
                        .primary_key(
                            Index::create()
                                .col(PremiseAttributes::PremiseId)
                                .col(PremiseAttributes::Key),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_premise_attributes_premise")
                                .from(PremiseAttributes::Table, PremiseAttributes::PremiseId)
                                .to(Premises::Table, Premises::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(PremiseAttributes::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Premises::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Premises {
        Table,
        Id,
        TenantId,
        Name,
        Address,
        CountryId,
        AreaId,
        StatusId,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum PremiseAttributes {
        Table,
        PremiseId,
        Key,
        TenantId,
        Value,
    }
}

mod m20250210_000002_create_vehicles {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250210_000002_create_vehicles"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Vehicles::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Vehicles::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Vehicles::TenantId).uuid().not_null())
                        .col(
                            ColumnDef::new(Vehicles::RegistrationNo)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Vehicles::Label).string())
                        .col(ColumnDef::new(Vehicles::CountryId).big_integer())
                        .col(ColumnDef::new(Vehicles::AreaId).big_integer())
                        .col(ColumnDef::new(Vehicles::StatusId).big_integer())
                        .col(
                            ColumnDef::new(Vehicles::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            // One registration number per tenant
            manager
                .create_index(
                    Index::create()
                        .name("uq_vehicles_tenant_registration")
                        .table(Vehicles::Table)
                        .col(Vehicles::TenantId)
                        .col(Vehicles::RegistrationNo)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(VehicleAttributes::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(VehicleAttributes::VehicleId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(VehicleAttributes::Key).string().not_null())
                        .col(
                            ColumnDef::new(VehicleAttributes::TenantId)
                                .uuid()
                                .not_null(),
                        )
                        .col(ColumnDef::new(VehicleAttributes::Value).string().not_null())
                        .primary_key(
                            Index::create()
                                .col(VehicleAttributes::VehicleId)
                                .col(VehicleAttributes::Key),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_vehicle_attributes_vehicle")
                                .from(VehicleAttributes::Table, VehicleAttributes::VehicleId)
                                .to(Vehicles::Table, Vehicles::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(VehicleAttributes::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Vehicles::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Vehicles {
        Table,
        Id,
        TenantId,
        RegistrationNo,
        Label,
        CountryId,
        AreaId,
        StatusId,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum VehicleAttributes {
        Table,
        VehicleId,
        Key,
        TenantId,
        Value,
    }
}
