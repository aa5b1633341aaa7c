//! Shared helpers: seeded RNG, failing and recording stores.

use colortap_core::{ColorTapError, KeyValueStore, MemoryStore, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Mutex;

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Every read and write fails, like a device store that is full or locked.
pub struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get_item(&self, _key: &str) -> Result<Option<String>> {
        Err(ColorTapError::StoreUnavailable("read refused".to_string()))
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<()> {
        Err(ColorTapError::StoreUnavailable("write refused".to_string()))
    }
}

/// MemoryStore that also records the order of writes.
#[derive(Default)]
pub struct RecordingStore {
    inner: MemoryStore,
    pub writes: Mutex<Vec<(String, String)>>,
}

impl RecordingStore {
    pub fn writes_for(&self, key: &str) -> Vec<String> {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .collect()
    }
}

impl KeyValueStore for RecordingStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.inner.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.writes.lock().unwrap().push((key.to_string(), value.to_string()));
        self.inner.set_item(key, value)
    }
}
