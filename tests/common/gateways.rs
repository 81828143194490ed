//! Gateway doubles for exercising the persistence boundary.

use std::sync::atomic::{AtomicUsize, Ordering};

use controlla::{GatewayError, InMemoryGateway, PersistenceGateway, RawRecord, RecordId};

/// In-memory gateway that counts calls
#[derive(Debug, Default)]
pub struct CountingGateway {
    inner: InMemoryGateway,
    pub finds: AtomicUsize,
    pub upserts: AtomicUsize,
}

impl CountingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert_count(&self) -> usize {
        self.upserts.load(Ordering::SeqCst)
    }

    pub fn find_count(&self) -> usize {
        self.finds.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

impl PersistenceGateway for CountingGateway {
    fn find_by_id(&self, id: RecordId) -> Result<RawRecord, GatewayError> {
        self.finds.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_id(id)
    }

    fn upsert(&self, attributes: &RawRecord) -> Result<RawRecord, GatewayError> {
        self.upserts.fetch_add(1, Ordering::SeqCst);
        self.inner.upsert(attributes)
    }
}

/// Gateway whose backend is always down
pub struct OfflineGateway;

pub const OFFLINE_MESSAGE: &str = "connection refused";

impl PersistenceGateway for OfflineGateway {
    fn find_by_id(&self, _id: RecordId) -> Result<RawRecord, GatewayError> {
        Err(GatewayError::persistence(OFFLINE_MESSAGE))
    }

    fn upsert(&self, _attributes: &RawRecord) -> Result<RawRecord, GatewayError> {
        Err(GatewayError::persistence(OFFLINE_MESSAGE))
    }
}
