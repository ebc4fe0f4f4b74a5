//! Contract error types for the asset registry
//!
//! Transport-agnostic; the REST layer maps these onto RFC-9457 problem
//! responses.

/// Asset registry domain errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Referenced record does not exist or is not visible to the tenant
    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },

    /// Duplicate identifier (vehicle registration number)
    #[error("Conflict: {reason}")]
    Conflict { reason: String },

    /// Validation error, detected before any write
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Internal error
    #[error("Internal error")]
    Internal,
}
