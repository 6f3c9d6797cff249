//! Runs once per pipeline instance: decides the logical partition set per
//! transaction and gates transaction admission. All retry and backoff policy
//! lives in the external sequencer driving this component.

use tracing::debug;

use crate::Result;
use crate::source::SourceCoordinator;
use crate::txn::TxnId;

pub struct BatchCoordinator<C> {
    coordinator: C,
}

impl<C> BatchCoordinator<C>
where
    C: SourceCoordinator,
{
    pub fn new(coordinator: C) -> Self {
        Self { coordinator }
    }

    /// Returns the partition set for `txid`. Idempotent: a transaction that
    /// was already initialized (a populated `curr_meta`, e.g. on replay after
    /// a crash) gets exactly that value back, regardless of `prev_meta` or of
    /// where the source has moved since. This is what makes the whole
    /// pipeline safe to retry.
    pub async fn initialize_transaction(
        &mut self,
        txid: TxnId,
        prev_meta: Option<&C::Meta>,
        curr_meta: Option<C::Meta>,
    ) -> Result<C::Meta> {
        debug!(txid, ?prev_meta, ?curr_meta, "initializing transaction");
        match curr_meta {
            Some(meta) => Ok(meta),
            None => self.coordinator.partitions_for_batch().await,
        }
    }

    /// Whether the source can serve `txid` yet. `false` is a backpressure
    /// signal; the sequencer delays and retries.
    pub async fn is_ready(&mut self, txid: TxnId) -> bool {
        let ready = self.coordinator.is_ready(txid).await;
        debug!(txid, ready, "transaction readiness");
        ready
    }

    /// Informational only; cleanup on success is the emitter's job.
    pub fn success(&mut self, txid: TxnId) {
        debug!(txid, "transaction succeeded");
    }

    pub async fn close(&mut self) -> Result<()> {
        debug!("closing coordinator");
        self.coordinator.close().await
    }
}
