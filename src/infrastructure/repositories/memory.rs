//! In-memory persistence gateway
//!
//! Keeps records in a map behind a mutex. Used for tests and for entity
//! types that never outlive the process.

use std::collections::BTreeMap;

use parking_lot::Mutex;

use super::upsert_record;
use crate::domain::entities::RawRecord;
use crate::domain::ports::{GatewayError, PersistenceGateway};
use crate::domain::value_objects::RecordId;

#[derive(Debug, Default)]
pub struct InMemoryGateway {
    records: Mutex<BTreeMap<u64, RawRecord>>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gateway pre-populated with `records`; each must carry an `id`
    pub fn with_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let records = records
            .into_iter()
            .filter_map(|r| {
                let id = r.get(RecordId::KEY).and_then(RecordId::from_value)?;
                Some((id.get(), r))
            })
            .collect();
        Self {
            records: Mutex::new(records),
        }
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Copy of every stored record, ordered by id
    pub fn records(&self) -> Vec<RawRecord> {
        self.records.lock().values().cloned().collect()
    }
}

impl PersistenceGateway for InMemoryGateway {
    fn find_by_id(&self, id: RecordId) -> Result<RawRecord, GatewayError> {
        self.records
            .lock()
            .get(&id.get())
            .cloned()
            .ok_or(GatewayError::NotFound { id })
    }

    fn upsert(&self, attributes: &RawRecord) -> Result<RawRecord, GatewayError> {
        upsert_record(&mut self.records.lock(), attributes)
    }
}
