//! In-memory implementation of [StateStore] for tests and local runs. It is
//! durable only for the lifetime of the process; sharing one instance across
//! emitter restarts in a test stands in for a real durable backend.

use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::RwLock;

use super::{StateStore, StateStoreError};

pub struct InMemoryStateStore {
    name: String,
    // Never held across an await point.
    entries: RwLock<HashMap<String, Bytes>>,
}

impl InMemoryStateStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn keys(&self) -> std::result::Result<Vec<String>, StateStoreError> {
        Ok(self.entries.read().keys().cloned().collect())
    }

    async fn get(&self, key: &str) -> std::result::Result<Option<Bytes>, StateStoreError> {
        Ok(self.entries.read().get(key).cloned())
    }

    async fn put(&self, key: &str, value: Bytes) -> std::result::Result<(), StateStoreError> {
        self.entries.write().insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> std::result::Result<(), StateStoreError> {
        self.entries.write().remove(key);
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
