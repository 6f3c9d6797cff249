//! Bounded, persistence-backed history of batch descriptors for one partition,
//! keyed by transaction id. The window holds the current and recently succeeded
//! transactions only; [RotatingState::retire_before] is the sole memory bound.
//!
//! Invariants: at most one descriptor exists per transaction id and it never
//! changes once stored; ids below the last retire watermark never reappear.

use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::Error;
use crate::Result;
use crate::state::transactional::TransactionalState;
use crate::txn::TxnId;

/// What the emitter must do for a transaction on this partition.
#[derive(Debug, Clone, PartialEq)]
pub enum TxnLookup<M> {
    /// A descriptor already exists for this id: re-emit from it verbatim.
    Replay(M),
    /// A strictly newer transaction was already processed here; an older
    /// retry must never re-emit past progress.
    Superseded,
    /// Nothing known for this id: create a fresh batch, seeded with the
    /// latest descriptor below it, if any.
    Create { prior: Option<M> },
}

pub struct RotatingState<M> {
    state: TransactionalState,
    path: String,
    curr: BTreeMap<TxnId, M>,
}

impl<M> RotatingState<M>
where
    M: Serialize + DeserializeOwned + Clone,
{
    /// Builds the in-memory window from whatever the store already holds under
    /// `path`, so a restarted task observes its own pre-crash writes.
    pub async fn recover(state: TransactionalState, path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let mut curr = BTreeMap::new();
        for child in state.list(&path).await? {
            match child.parse::<TxnId>() {
                Ok(txid) => {
                    if let Some(meta) = state.get_data::<M>(&txid_path(&path, txid)).await? {
                        curr.insert(txid, meta);
                    }
                }
                Err(_) => {
                    warn!(partition = %path, key = %child, "ignoring foreign key in partition state");
                }
            }
        }
        debug!(partition = %path, entries = curr.len(), "recovered rotating state");
        Ok(Self { state, path, curr })
    }

    pub fn lookup(&self, txid: TxnId) -> TxnLookup<M> {
        if let Some(meta) = self.curr.get(&txid) {
            return TxnLookup::Replay(meta.clone());
        }
        if self.curr.keys().next_back().is_some_and(|latest| *latest > txid) {
            return TxnLookup::Superseded;
        }
        let prior = self.curr.range(..txid).next_back().map(|(_, m)| m.clone());
        TxnLookup::Create { prior }
    }

    /// Persists and remembers the descriptor for `txid`. Descriptors are
    /// immutable once stored; a second store for the same id is a protocol
    /// violation.
    pub async fn store(&mut self, txid: TxnId, meta: M) -> Result<()> {
        if self.curr.contains_key(&txid) {
            return Err(Error::State(format!(
                "descriptor for txid {} already exists under {}",
                txid, self.path
            )));
        }
        self.state.set_data(&txid_path(&self.path, txid), &meta).await?;
        self.curr.insert(txid, meta);
        Ok(())
    }

    /// Drops every descriptor with id below `txid`, in memory and in the
    /// store. Must only run once the transaction at `txid` is durably
    /// committed downstream.
    pub async fn retire_before(&mut self, txid: TxnId) -> Result<()> {
        let keep = self.curr.split_off(&txid);
        let stale = std::mem::replace(&mut self.curr, keep);
        for id in stale.keys() {
            self.state.delete(&txid_path(&self.path, *id)).await?;
        }
        if !stale.is_empty() {
            debug!(partition = %self.path, watermark = txid, retired = stale.len(), "retired descriptors");
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.curr.len()
    }
}

fn txid_path(path: &str, txid: TxnId) -> String {
    format!("{path}/{txid}")
}
