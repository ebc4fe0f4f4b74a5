//! Module Configuration Engine
//!
//! Tenants activate platform modules (Premises, Vehicles, ...) under
//! partial scopes built from four dimensions: country, property type,
//! premises type and area. Each activation selects which tenant-defined
//! fields apply. At render time a partial scope context resolves to the
//! single most specific enabled activation; NULL dimensions act as
//! wildcards.

// Public exports
pub mod contract;
pub use contract::{
    Activation, ActivationDetails, ActivationDraft, ActivationUpdate, ConfigError,
    FieldDefinition, FieldDraft, FieldOption, FieldSection, FieldType, Module, OptionDraft,
    ResolvedFields, ScopeCatalog, ScopeContext, ScopeDimension, ScopeTuple, ScopeValue,
    SectionDraft, Status,
};

pub mod module;
pub use module::ModuleConfigModule;

pub use config::Config;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
