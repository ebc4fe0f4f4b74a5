//! SeaORM entities for the asset registry tables

/// Premise core row
pub mod premise {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "premises")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub tenant_id: Uuid,
        pub name: String,
        pub address: Option<String>,
        pub country_id: Option<i64>,
        pub area_id: Option<i64>,
        pub status_id: Option<i64>,
        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Dynamic attribute row of a premise
pub mod premise_attribute {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "premise_attributes")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub premise_id: i64,
        #[sea_orm(primary_key, auto_increment = false)]
        pub key: String,
        pub tenant_id: Uuid,
        pub value: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::premise::Entity",
            from = "Column::PremiseId",
            to = "super::premise::Column::Id"
        )]
        Premise,
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Vehicle core row
pub mod vehicle {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "vehicles")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub tenant_id: Uuid,
        pub registration_no: String,
        pub label: Option<String>,
        pub country_id: Option<i64>,
        pub area_id: Option<i64>,
        pub status_id: Option<i64>,
        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Dynamic attribute row of a vehicle
pub mod vehicle_attribute {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "vehicle_attributes")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub vehicle_id: i64,
        #[sea_orm(primary_key, auto_increment = false)]
        pub key: String,
        pub tenant_id: Uuid,
        pub value: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::vehicle::Entity",
            from = "Column::VehicleId",
            to = "super::vehicle::Column::Id"
        )]
        Vehicle,
    }

    impl ActiveModelBehavior for ActiveModel {}
}
