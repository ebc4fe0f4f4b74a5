//! SeaORM entities for the module configuration tables

/// Platform module catalog
pub mod module {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "modules")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub name: String,
        pub active: bool,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Country scope catalog
pub mod country {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "countries")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub label: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Property type scope catalog
pub mod property_type {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "property_types")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub label: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Premises type scope catalog
pub mod premises_type {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "premises_types")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub label: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Area scope catalog
pub mod area {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "areas")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub label: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Status label catalog
pub mod status {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "statuses")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub label: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Tenant-defined field section
pub mod field_section {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "field_sections")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub tenant_id: Uuid,
        pub module_id: i64,
        pub name: String,
        pub sort_order: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::module::Entity",
            from = "Column::ModuleId",
            to = "super::module::Column::Id"
        )]
        Module,
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Tenant-defined field definition
pub mod field_definition {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "field_definitions")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub tenant_id: Uuid,
        pub module_id: i64,
        pub section_id: i64,
        pub key: String,
        pub label: String,
        pub field_type: String,
        pub placeholder: Option<String>,
        pub required: bool,
        pub active: bool,
        pub sort_order: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::field_section::Entity",
            from = "Column::SectionId",
            to = "super::field_section::Column::Id"
        )]
        Section,
        #[sea_orm(
            belongs_to = "super::module::Entity",
            from = "Column::ModuleId",
            to = "super::module::Column::Id"
        )]
        Module,
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Option row of a choice-type field
pub mod field_option {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "field_options")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub field_id: i64,
        pub label: String,
        pub value: String,
        pub sort_order: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::field_definition::Entity",
            from = "Column::FieldId",
            to = "super::field_definition::Column::Id"
        )]
        Field,
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Module activation row; NULL scope columns are wildcards
pub mod activation {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "module_activations")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub tenant_id: Uuid,
        pub module_id: i64,
        pub enabled: bool,
        pub country_id: Option<i64>,
        pub property_type_id: Option<i64>,
        pub premises_type_id: Option<i64>,
        pub area_id: Option<i64>,
        pub status_id: Option<i64>,
        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::module::Entity",
            from = "Column::ModuleId",
            to = "super::module::Column::Id"
        )]
        Module,
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Field selection of an activation
pub mod activation_field {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "activation_fields")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub activation_id: i64,
        #[sea_orm(primary_key, auto_increment = false)]
        pub field_id: i64,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::activation::Entity",
            from = "Column::ActivationId",
            to = "super::activation::Column::Id"
        )]
        Activation,
        #[sea_orm(
            belongs_to = "super::field_definition::Entity",
            from = "Column::FieldId",
            to = "super::field_definition::Column::Id"
        )]
        Field,
    }

    impl ActiveModelBehavior for ActiveModel {}
}
