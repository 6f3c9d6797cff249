//! Contracts the partitioned data source must implement. The source is split
//! the way the pipeline is: a coordinator side that decides the global
//! partition set per transaction, and an emitter side that produces and
//! replays per-partition batches. Both metadata types are opaque to the core:
//! coordinator metadata is only compared by value, partition metadata is only
//! persisted and handed back verbatim.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::Result;
use crate::assign;
use crate::collector::Collector;
use crate::txn::{TxnAttempt, TxnId};

/// One independently-progressing slice of the data source. The id keys the
/// persisted rotating state, so it must be stable across restarts.
pub trait SourcePartition: Clone + Send + Sync {
    fn id(&self) -> String;
}

/// Outcome of creating a new batch for a partition. Replaces a null-encoded
/// result: an empty batch is an explicit outcome and creates no descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum NewBatch<M> {
    /// Records were emitted; the descriptor to persist for replay.
    Created(M),
    /// Nothing new to emit for this transaction.
    Empty,
}

/// Coordinator-side view of the data source. One instance per pipeline.
#[async_trait]
pub trait SourceCoordinator: Send {
    /// The partition set visible to one transaction. Compared by value across
    /// transactions by every emitter to detect partition-set changes.
    type Meta: Clone + PartialEq + fmt::Debug + Send;

    /// Returns the partition set for a fresh transaction.
    async fn partitions_for_batch(&mut self) -> Result<Self::Meta>;

    /// Backpressure signal, not an error: `false` tells the sequencer to
    /// retry the transaction later.
    async fn is_ready(&mut self, txid: TxnId) -> bool;

    async fn close(&mut self) -> Result<()>;
}

/// Emitter-side view of the data source. One instance per task.
#[async_trait]
pub trait PartitionedSource: Send {
    type Partition: SourcePartition;
    /// Must match the coordinator's metadata type; replays of a transaction
    /// observe the same value and therefore the same ownership.
    type Meta: Clone + PartialEq + fmt::Debug + Send + Sync;
    /// Per-partition progress descriptor, e.g. an offset range. Persisted as
    /// JSON and re-submitted verbatim on replay.
    type PartitionMeta: Clone + PartialEq + fmt::Debug + Serialize + DeserializeOwned + Send + Sync;
    type Record: Send;

    /// Expands coordinator metadata into the full ordered partition list.
    /// The order must be deterministic for a given metadata value; ownership
    /// is derived from positions in this list.
    async fn ordered_partitions(&mut self, meta: &Self::Meta) -> Result<Vec<Self::Partition>>;

    /// The subset of `ordered` owned by this task. The default strided
    /// assignment is deterministic, disjoint and total across tasks; override
    /// only with an assignment that keeps those properties.
    fn partitions_for_task(
        &self,
        task_index: usize,
        task_count: usize,
        ordered: &[Self::Partition],
    ) -> Vec<Self::Partition> {
        assign::task_partitions(task_index, task_count, ordered)
    }

    /// Notification hook invoked whenever this task's owned partition set is
    /// recomputed, before any batch for the new set is emitted.
    async fn refresh_partitions(&mut self, owned: &[Self::Partition]);

    /// Creates the next batch for `partition` after `prior` (`None` on the
    /// very first batch) and emits its records into `collector`. Creation and
    /// emission are combined so a batch is never derived twice.
    async fn emit_batch_new(
        &mut self,
        attempt: TxnAttempt,
        collector: &mut dyn Collector<Record = Self::Record>,
        partition: &Self::Partition,
        prior: Option<&Self::PartitionMeta>,
    ) -> Result<NewBatch<Self::PartitionMeta>>;

    /// Re-emits the exact batch described by `meta`. Must be deterministic:
    /// the same descriptor yields the same records, however far the source
    /// has advanced since.
    async fn emit_batch(
        &mut self,
        attempt: TxnAttempt,
        collector: &mut dyn Collector<Record = Self::Record>,
        partition: &Self::Partition,
        meta: &Self::PartitionMeta,
    ) -> Result<()>;

    async fn close(&mut self) -> Result<()>;
}
