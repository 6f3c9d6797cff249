//! Deterministic partition-to-task assignment. Every task evaluates this pure
//! function against the same ordered partition list, so all tasks arrive at a
//! consistent, disjoint partitioning without any cross-task communication.

/// Returns the subset of `ordered` owned by the task at `task_index` out of
/// `task_count` tasks, striding over the list. An out-of-range index owns
/// nothing; validation of the task context happens upstream.
pub fn task_partitions<P: Clone>(task_index: usize, task_count: usize, ordered: &[P]) -> Vec<P> {
    if task_count == 0 || task_index >= task_count {
        return Vec::new();
    }
    ordered
        .iter()
        .skip(task_index)
        .step_by(task_count)
        .cloned()
        .collect()
}
