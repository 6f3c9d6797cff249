//! Exactly-once batch coordination for a partitioned streaming source.
//!
//! An external sequencer mints strictly increasing transaction ids and drives
//! one [BatchCoordinator](coordinator::BatchCoordinator) per pipeline and one
//! [BatchEmitter](emitter::BatchEmitter) per task. Per transaction the
//! coordinator decides the partition set; that value is broadcast to every
//! emitter, which derives its owned partitions deterministically and, per
//! partition, either creates a fresh batch or replays a previously stored
//! descriptor. Descriptors live in a bounded
//! [rotating state](state::rotating::RotatingState) backed by a durable
//! [key-value substrate](state::StateStore), which is what makes a retried
//! transaction replay identically across task restarts.

pub mod assign;
pub mod collector;
pub mod config;
pub mod coordinator;
pub mod emitter;
mod error;
pub mod source;
pub mod state;
pub mod txn;

pub use crate::error::{Error, Result};
