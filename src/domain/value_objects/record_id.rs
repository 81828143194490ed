//! Record identifier value object
//!
//! Identifies one stored record. Gateways assign identifiers on create and
//! expose them to entities through the `id` attribute.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Numeric identifier of a persisted record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl RecordId {
    /// Attribute key under which gateways store the identifier
    pub const KEY: &'static str = "id";

    pub fn get(self) -> u64 {
        self.0
    }

    /// Read an identifier from an attribute value.
    ///
    /// Accepts non-negative integers and digit-only strings.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_u64().map(RecordId),
            Value::String(s) => s.trim().parse().ok().map(RecordId),
            _ => None,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        RecordId(id)
    }
}

impl From<RecordId> for Value {
    fn from(id: RecordId) -> Self {
        Value::from(id.0)
    }
}
