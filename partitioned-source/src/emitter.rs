//! Runs once per task: produces the records of every transaction for the
//! partitions this task owns, replaying deterministically under failure. The
//! emitter is single-threaded by construction (exclusive `&mut self` API);
//! transactions for one task arrive strictly in increasing txid order, driven
//! by the external sequencer.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::Error;
use crate::Result;
use crate::collector::Collector;
use crate::config::EmitterConfig;
use crate::source::{NewBatch, PartitionedSource, SourcePartition};
use crate::state::StateStore;
use crate::state::rotating::{RotatingState, TxnLookup};
use crate::state::transactional::TransactionalState;
use crate::txn::TxnAttempt;

struct EmitterPartitionState<S: PartitionedSource> {
    rotating: RotatingState<S::PartitionMeta>,
    partition: S::Partition,
}

pub struct BatchEmitter<S: PartitionedSource> {
    source: S,
    state: TransactionalState,
    task_index: usize,
    task_count: usize,
    saved_meta: Option<S::Meta>,
    // Keyed by partition id; ordered so partitions are processed in a stable
    // order within one call.
    partition_states: BTreeMap<String, EmitterPartitionState<S>>,
    closed: bool,
}

impl<S> BatchEmitter<S>
where
    S: PartitionedSource,
{
    pub fn new(source: S, store: Arc<dyn StateStore>, config: EmitterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            source,
            state: TransactionalState::new(store, config.state_root),
            task_index: config.task.task_index,
            task_count: config.task.task_count,
            saved_meta: None,
            partition_states: BTreeMap::new(),
            closed: false,
        })
    }

    /// Emits the batch for `attempt` on every owned partition. For each
    /// partition, either a fresh batch is created and its descriptor stored,
    /// an already-known descriptor is replayed verbatim, or the transaction is
    /// skipped because a newer one already went through. A source failure on
    /// any partition fails the whole call; descriptors stored before the
    /// failure stay and replay on the sequencer's retry.
    pub async fn emit_batch(
        &mut self,
        attempt: TxnAttempt,
        coordinator_meta: &S::Meta,
        collector: &mut dyn Collector<Record = S::Record>,
    ) -> Result<()> {
        if self.closed {
            return Err(Error::Close("emit_batch on a closed emitter".to_string()));
        }
        debug!(%attempt, ?coordinator_meta, "emitting batch");

        if self.saved_meta.as_ref() != Some(coordinator_meta) {
            self.refresh_ownership(coordinator_meta).await?;
        }

        let txid = attempt.txid();
        let Self {
            source,
            partition_states,
            ..
        } = &mut *self;
        for ps in partition_states.values_mut() {
            match ps.rotating.lookup(txid) {
                TxnLookup::Create { prior } => {
                    let outcome = source
                        .emit_batch_new(attempt, collector, &ps.partition, prior.as_ref())
                        .await?;
                    match outcome {
                        NewBatch::Created(meta) => ps.rotating.store(txid, meta).await?,
                        NewBatch::Empty => {
                            debug!(%attempt, partition = %ps.partition.id(), "no new data for partition");
                        }
                    }
                }
                TxnLookup::Replay(meta) => {
                    source
                        .emit_batch(attempt, collector, &ps.partition, &meta)
                        .await?;
                }
                TxnLookup::Superseded => {
                    debug!(%attempt, partition = %ps.partition.id(), "superseded by a newer transaction, skipping");
                }
            }
        }

        debug!(%attempt, "emitted batch");
        Ok(())
    }

    /// Retires every descriptor below the committed txid on every owned
    /// partition. Must only be called after the sequencer has durably
    /// recorded the transaction as committed.
    pub async fn success(&mut self, attempt: TxnAttempt) -> Result<()> {
        if self.closed {
            return Err(Error::Close("success on a closed emitter".to_string()));
        }
        debug!(%attempt, "transaction succeeded");
        for ps in self.partition_states.values_mut() {
            ps.rotating.retire_before(attempt.txid()).await?;
        }
        Ok(())
    }

    /// Closes the persistence handle and the source's emitter side. Both are
    /// attempted even if the first fails; failures are merged. Idempotent.
    pub async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        debug!("closing emitter");

        let state_result = self.state.close().await;
        let source_result = self.source.close().await;

        let mut failures = Vec::new();
        if let Err(e) = state_result {
            failures.push(format!("state handle: {e}"));
        }
        if let Err(e) = source_result {
            failures.push(format!("source emitter: {e}"));
        }
        if failures.is_empty() {
            debug!("closed emitter");
            Ok(())
        } else {
            Err(Error::Close(failures.join("; ")))
        }
    }

    /// Recomputes this task's owned partitions for a new coordinator metadata
    /// epoch. All per-partition state is rebuilt wholesale; partitions no
    /// longer owned are simply dropped.
    async fn refresh_ownership(&mut self, coordinator_meta: &S::Meta) -> Result<()> {
        self.partition_states.clear();

        let ordered = self.source.ordered_partitions(coordinator_meta).await?;
        let owned = self
            .source
            .partitions_for_task(self.task_index, self.task_count, &ordered);
        info!(
            task_index = self.task_index,
            task_count = self.task_count,
            owned = owned.len(),
            total = ordered.len(),
            "partition ownership recomputed"
        );

        for partition in &owned {
            let rotating = RotatingState::recover(self.state.clone(), partition.id()).await?;
            self.partition_states.insert(
                partition.id(),
                EmitterPartitionState {
                    rotating,
                    partition: partition.clone(),
                },
            );
        }

        self.source.refresh_partitions(&owned).await;
        self.saved_meta = Some(coordinator_meta.clone());
        Ok(())
    }
}
