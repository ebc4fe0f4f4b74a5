//! Contract layer - public API of the module configuration engine
//!
//! This layer contains transport-agnostic models and errors.
//! NO serde derives on models - these are pure domain types.

pub mod error;
pub mod model;

pub use error::ConfigError;
pub use model::{
    Activation, ActivationDetails, ActivationDraft, ActivationUpdate, FieldDefinition, FieldDraft,
    FieldOption, FieldSection, FieldType, Module, OptionDraft, ResolvedFields, ScopeCatalog,
    ScopeContext, ScopeDimension, ScopeTuple, ScopeValue, SectionDraft, Status,
};
