//! JSON file persistence gateway
//!
//! Stores every record of one entity type in a single JSON document.
//! Read-modify-write cycles hold an exclusive lock on a sibling `.lock` file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::{Deserialize, Serialize};

use super::upsert_record;
use crate::config::StoreConfig;
use crate::domain::entities::RawRecord;
use crate::domain::ports::{GatewayError, PersistenceGateway};
use crate::domain::value_objects::RecordId;

const STORE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct JsonStore {
    version: u32,
    #[serde(default)]
    records: BTreeMap<u64, RawRecord>,
}

impl Default for JsonStore {
    fn default() -> Self {
        Self {
            version: STORE_VERSION,
            records: BTreeMap::new(),
        }
    }
}

pub struct JsonFileGateway {
    path: PathBuf,
    pretty: bool,
}

impl JsonFileGateway {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pretty: false,
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self {
            path: config.path.clone(),
            pretty: config.pretty,
        }
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn open_lock(&self) -> Result<fs::File, GatewayError> {
        let lock_path = self.lock_path();
        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent).map_err(access_error)?;
        }
        fs::File::create(&lock_path).map_err(access_error)
    }

    fn load_from_disk(&self) -> Result<JsonStore, GatewayError> {
        if !self.path.exists() {
            return Ok(JsonStore::default());
        }

        let content = fs::read_to_string(&self.path).map_err(access_error)?;
        serde_json::from_str(&content).map_err(|e| {
            GatewayError::persistence(format!(
                "store file corrupted: {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    fn save_to_disk(&self, store: &JsonStore) -> Result<(), GatewayError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(access_error)?;
        }

        let content = if self.pretty {
            serde_json::to_string_pretty(store)
        } else {
            serde_json::to_string(store)
        }
        .map_err(|e| GatewayError::persistence(e.to_string()))?;

        fs::write(&self.path, content).map_err(access_error)
    }
}

impl PersistenceGateway for JsonFileGateway {
    fn find_by_id(&self, id: RecordId) -> Result<RawRecord, GatewayError> {
        let lock_file = self.open_lock()?;
        lock_file.lock_shared().map_err(access_error)?;

        let result = self.load_from_disk().and_then(|mut store| {
            store
                .records
                .remove(&id.get())
                .ok_or(GatewayError::NotFound { id })
        });

        let _ = lock_file.unlock();
        result
    }

    fn upsert(&self, attributes: &RawRecord) -> Result<RawRecord, GatewayError> {
        let lock_file = self.open_lock()?;
        lock_file.lock_exclusive().map_err(access_error)?;

        let result = self.load_from_disk().and_then(|mut store| {
            let record = upsert_record(&mut store.records, attributes)?;
            self.save_to_disk(&store)?;
            Ok(record)
        });

        let _ = lock_file.unlock();
        result
    }
}

fn access_error(e: std::io::Error) -> GatewayError {
    GatewayError::persistence(format!("failed to access store: {}", e))
}
