//! Domain layer: service orchestration, repository ports and the
//! specificity resolver.

pub mod repository;
pub mod resolver;
pub mod service;
pub mod slug;

pub use repository::{ActivationRepository, CatalogRepository, SchemaRepository};
pub use service::ConfigService;
