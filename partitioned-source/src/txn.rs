//! Transaction identities minted by the external sequencer. A [TxnId] names one
//! batch cycle of the whole pipeline and is never reused; a [TxnAttempt] is one
//! (possibly retried) execution of that cycle. The core treats the attempt as an
//! opaque correlation token except for extracting the transaction id.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Strictly increasing, 64-bit transaction id.
pub type TxnId = u64;

/// One attempt at a transaction. Retries of the same [TxnId] after a failure
/// carry a higher attempt counter, letting downstream stages detect stale
/// in-flight emissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TxnAttempt {
    txid: TxnId,
    attempt: u64,
}

impl TxnAttempt {
    pub fn new(txid: TxnId, attempt: u64) -> Self {
        Self { txid, attempt }
    }

    pub fn txid(&self) -> TxnId {
        self.txid
    }

    pub fn attempt(&self) -> u64 {
        self.attempt
    }
}

impl fmt::Display for TxnAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.txid, self.attempt)
    }
}
