//! PersistenceGateway port
//!
//! The storage collaborator an entity delegates to. Only two operations are
//! consumed: lookup by identifier and update-or-create.

use crate::domain::entities::RawRecord;
use crate::domain::value_objects::RecordId;

pub trait PersistenceGateway: Send + Sync {
    /// Fetch the record stored under `id`
    fn find_by_id(&self, id: RecordId) -> Result<RawRecord, GatewayError>;

    /// Update the matching record or create a new one, returning the stored
    /// columns including any server-assigned fields
    fn upsert(&self, attributes: &RawRecord) -> Result<RawRecord, GatewayError>;
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GatewayError {
    #[error("no record found with id {id}")]
    NotFound { id: RecordId },

    #[error("persistence failure: {message}")]
    Persistence { message: String },
}

impl GatewayError {
    pub fn persistence(message: impl Into<String>) -> Self {
        GatewayError::Persistence {
            message: message.into(),
        }
    }
}
