//! Contract error types for the community catalog
//!
//! These errors are transport-agnostic and used for inter-module communication.

/// Catalog domain errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Entity could not be resolved by either id or name
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Resource type (community, company, plan, ...)
        resource: String,
        /// Identifier or name that failed to resolve
        id: String,
    },

    /// Write input failed structural validation
    #[error("validation error: {message}")]
    Validation {
        /// Validation error message
        message: String,
    },

    /// Uniqueness violation on a write path
    #[error("conflict: {reason}")]
    Conflict {
        /// Conflict reason
        reason: String,
    },

    /// Storage failure, propagated unchanged - never collapsed into NotFound
    #[error("storage error")]
    Storage(#[from] anyhow::Error),
}

impl CatalogError {
    pub fn not_found(resource: &str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.to_string(),
            id: id.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict {
            reason: reason.into(),
        }
    }
}
