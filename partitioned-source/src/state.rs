//! Durable state for the coordination core: a pluggable key-value substrate
//! ([StateStore]), a namespaced JSON view over it ([transactional]), and the
//! bounded per-partition descriptor history ([rotating]) the emitter replays
//! from. The substrate must survive task restarts; everything above it is
//! rebuilt in memory from whatever the store holds.
//!
//! The trait uses `async_trait` to stay object safe, allowing usage as
//! `Arc<dyn StateStore>` for dynamic dispatch.

use async_trait::async_trait;
use bytes::Bytes;
use std::error::Error as StdError;

pub mod in_memory;
pub mod rotating;
pub mod transactional;

/// Error type for store operations (boxed for object safety).
pub type StateStoreError = Box<dyn StdError + Send + Sync + 'static>;

/// Generic, durable key-value store. One task owns a namespace within the
/// store at a time; if task restarts could race, the backing implementation
/// must provide atomic writes per key.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Get all keys currently in the store.
    async fn keys(&self) -> std::result::Result<Vec<String>, StateStoreError>;

    /// Get the value for a given key, `None` if the key does not exist.
    async fn get(&self, key: &str) -> std::result::Result<Option<Bytes>, StateStoreError>;

    /// Insert or update a key-value pair.
    async fn put(&self, key: &str, value: Bytes) -> std::result::Result<(), StateStoreError>;

    /// Delete a key. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> std::result::Result<(), StateStoreError>;

    /// The store name/identifier, typically the bucket or collection name.
    fn name(&self) -> &str;

    /// Release the store handle. Must be idempotent; the default is a no-op
    /// for backends whose clients need no explicit shutdown.
    async fn close(&self) -> std::result::Result<(), StateStoreError> {
        Ok(())
    }
}
