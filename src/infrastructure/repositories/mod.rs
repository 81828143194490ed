//! Repository Implementations
//!
//! Concrete implementations of the persistence gateway port. Both follow
//! update-or-create semantics:
//! 1. attributes carrying the `id` of a stored record update that record
//! 2. otherwise a record whose columns equal every given attribute is reused
//! 3. otherwise a new record is created, keeping a supplied `id` if free

mod json_file;
mod memory;

pub use json_file::JsonFileGateway;
pub use memory::InMemoryGateway;

use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use serde_json::Value;

use crate::domain::entities::RawRecord;
use crate::domain::ports::GatewayError;
use crate::domain::value_objects::RecordId;

pub(crate) const CREATED_AT: &str = "created_at";
pub(crate) const UPDATED_AT: &str = "updated_at";

/// Apply update-or-create to `records`, returning the stored columns
pub(crate) fn upsert_record(
    records: &mut BTreeMap<u64, RawRecord>,
    attributes: &RawRecord,
) -> Result<RawRecord, GatewayError> {
    let now = Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));
    let requested_id = attributes.get(RecordId::KEY).and_then(RecordId::from_value);

    if let Some(id) = requested_id {
        if let Some(record) = records.get_mut(&id.get()) {
            record.extend(without_bookkeeping(attributes));
            record.insert(UPDATED_AT.to_string(), now);
            return Ok(record.clone());
        }
    }

    if requested_id.is_none() {
        if let Some(record) = records.values().find(|r| columns_match(r, attributes)) {
            return Ok(record.clone());
        }
    }

    let id = match requested_id {
        Some(id) => id,
        None => next_id(records)?,
    };
    let mut record = without_bookkeeping(attributes);
    record.insert(RecordId::KEY.to_string(), id.into());
    record.insert(CREATED_AT.to_string(), now.clone());
    record.insert(UPDATED_AT.to_string(), now);
    records.insert(id.get(), record.clone());
    Ok(record)
}

fn next_id(records: &BTreeMap<u64, RawRecord>) -> Result<RecordId, GatewayError> {
    match records.keys().next_back() {
        None => Ok(RecordId(1)),
        Some(last) => last
            .checked_add(1)
            .map(RecordId)
            .ok_or_else(|| GatewayError::persistence("record ids exhausted")),
    }
}

/// Attributes with gateway-owned columns removed
fn without_bookkeeping(attributes: &RawRecord) -> RawRecord {
    attributes
        .iter()
        .filter(|(k, _)| !matches!(k.as_str(), RecordId::KEY | CREATED_AT | UPDATED_AT))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

fn columns_match(record: &RawRecord, attributes: &RawRecord) -> bool {
    without_bookkeeping(attributes)
        .iter()
        .all(|(k, v)| record.get(k).unwrap_or(&Value::Null) == v)
}
