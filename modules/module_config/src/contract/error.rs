//! Contract error types for the module configuration engine
//!
//! These errors are transport-agnostic; the REST layer maps them to
//! RFC-9457 problem responses.

/// Module configuration domain errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Referenced resource does not exist or is not visible to the tenant
    NotFound {
        /// Resource type (module, section, field, activation)
        resource: String,
        /// Resource identifier
        id: String,
    },
    /// Conflict (duplicate scope tuple, duplicate field key)
    Conflict {
        /// Conflict reason
        reason: String,
    },
    /// Validation error, detected before any write
    Validation {
        /// Validation error message
        message: String,
    },
    /// Internal error
    Internal,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { resource, id } => {
                write!(f, "{} not found: {}", resource, id)
            }
            Self::Conflict { reason } => {
                write!(f, "Conflict: {}", reason)
            }
            Self::Validation { message } => {
                write!(f, "Validation error: {}", message)
            }
            Self::Internal => {
                write!(f, "Internal error")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
