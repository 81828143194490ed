//! Error types for Controlla
//!
//! Uses `thiserror` for library errors. Gateway failures are carried
//! transparently so callers see the storage error exactly as it was raised.

use thiserror::Error;

use crate::domain::ports::GatewayError;
use crate::domain::services::ValidationFailure;

/// Result type alias for Controlla operations
pub type ControllerResult<T> = Result<T, ControllerError>;

/// Main error type for entity operations
#[derive(Error, Debug)]
pub enum ControllerError {
    /// The entity type is declared incompletely (e.g. no persistence gateway)
    #[error("{entity} is misconfigured: {message}")]
    Configuration { entity: String, message: String },

    /// One or more attributes fail their declared rule
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    /// Failure raised by the persistence gateway, passed through unchanged
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Properties could not be encoded as JSON
    #[error("failed to encode properties: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ControllerError {
    pub(crate) fn configuration(entity: &str, message: impl Into<String>) -> Self {
        ControllerError::Configuration {
            entity: entity.to_string(),
            message: message.into(),
        }
    }

    /// True when a lookup found no backing record
    pub fn is_not_found(&self) -> bool {
        matches!(self, ControllerError::Gateway(GatewayError::NotFound { .. }))
    }

    /// Failing field names when this is a validation error
    pub fn validation_fields(&self) -> Option<Vec<&str>> {
        match self {
            ControllerError::Validation(failure) => Some(failure.fields().collect()),
            _ => None,
        }
    }
}
