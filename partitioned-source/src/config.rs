//! Configuration surface of the core. The coordinator needs none; the emitter
//! needs its task identity, the namespace its transactional state lives under,
//! and whatever opaque settings the data source wants passed through
//! unmodified.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Error;
use crate::Result;

const DEFAULT_STATE_ROOT: &str = "txn";

/// Identity of one task within the parallel set running the emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskContext {
    /// Zero-based index of this task.
    pub task_index: usize,
    /// Total number of tasks running the emitter.
    pub task_count: usize,
}

impl Default for TaskContext {
    fn default() -> Self {
        TaskContext {
            task_index: 0,
            task_count: 1,
        }
    }
}

impl TaskContext {
    pub fn validate(&self) -> Result<()> {
        if self.task_count == 0 {
            return Err(Error::Config("task_count must be non-zero".to_string()));
        }
        if self.task_index >= self.task_count {
            return Err(Error::Config(format!(
                "task_index {} out of range for task_count {}",
                self.task_index, self.task_count
            )));
        }
        Ok(())
    }
}

/// Configuration for one [BatchEmitter](crate::emitter::BatchEmitter) instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmitterConfig {
    /// Namespace the emitter's transactional state is rooted under. Two
    /// pipelines sharing one store must use distinct roots.
    pub state_root: String,
    pub task: TaskContext,
    /// Opaque key/value settings handed through to the data source.
    pub settings: HashMap<String, String>,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        EmitterConfig {
            state_root: DEFAULT_STATE_ROOT.to_string(),
            task: TaskContext::default(),
            settings: HashMap::new(),
        }
    }
}

impl EmitterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.state_root.is_empty() {
            return Err(Error::Config("state_root must not be empty".to_string()));
        }
        self.task.validate()
    }
}
