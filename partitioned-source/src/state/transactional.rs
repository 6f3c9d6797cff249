//! Namespaced, JSON-typed view over a [StateStore]. Paths are `/`-joined under
//! a root, so several components (or several pipelines) can share one store
//! without stepping on each other. Values are serialized with `serde_json`.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::Result;
use crate::state::StateStore;

pub struct TransactionalState {
    store: Arc<dyn StateStore>,
    root: String,
}

impl Clone for TransactionalState {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            root: self.root.clone(),
        }
    }
}

impl TransactionalState {
    pub fn new(store: Arc<dyn StateStore>, root: impl Into<String>) -> Self {
        Self {
            store,
            root: root.into(),
        }
    }

    fn key(&self, path: &str) -> String {
        format!("{}/{}", self.root, path)
    }

    pub async fn set_data<T: Serialize>(&self, path: &str, data: &T) -> Result<()> {
        let raw = serde_json::to_vec(data)?;
        self.store.put(&self.key(path), raw.into()).await?;
        Ok(())
    }

    pub async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        match self.store.get(&self.key(path)).await? {
            Some(raw) => Ok(Some(serde_json::from_slice(&raw)?)),
            None => Ok(None),
        }
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        self.store.delete(&self.key(path)).await?;
        Ok(())
    }

    /// Names of the direct children under `path`, sorted for determinism.
    pub async fn list(&self, path: &str) -> Result<Vec<String>> {
        let prefix = format!("{}/", self.key(path));
        let mut children: Vec<String> = self
            .store
            .keys()
            .await?
            .into_iter()
            .filter_map(|key| key.strip_prefix(&prefix).map(str::to_string))
            .filter(|child| !child.contains('/'))
            .collect();
        children.sort();
        Ok(children)
    }

    pub async fn close(&self) -> Result<()> {
        self.store.close().await?;
        Ok(())
    }
}
